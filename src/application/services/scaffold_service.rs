//! Scaffolding for new plugin repositories.
//!
//! Writes a minimal repository skeleton that already satisfies every
//! conformance check, so `init` followed by `check` passes out of the box.

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::errors::ScaffoldError;
use crate::domain::entities::descriptor::{reserved_name, well_formed_module_name, well_formed_name};
use crate::domain::entities::table::upper_camel;
use crate::domain::entities::{RepositoryDescriptor, Version};

/// Service that writes new repository skeletons
pub struct ScaffoldService;

impl ScaffoldService {
    pub fn new() -> Self {
        Self
    }

    /// Create a new repository skeleton under `parent`, returning its path.
    ///
    /// The target directory may already exist if it is empty; anything
    /// else is refused rather than overwritten.
    pub fn init(
        &self,
        name: &str,
        module: &str,
        parent: impl AsRef<Path>,
    ) -> Result<PathBuf, ScaffoldError> {
        if !well_formed_name(name) || reserved_name(name) {
            return Err(ScaffoldError::InvalidName(name.to_string()));
        }
        if !well_formed_module_name(module) {
            return Err(ScaffoldError::InvalidModuleName(module.to_string()));
        }

        let target = parent.as_ref().join(name);
        if target.exists() {
            let occupied = fs::read_dir(&target)?.next().is_some();
            if occupied {
                return Err(ScaffoldError::TargetExists(target.display().to_string()));
            }
        }

        let module_dir = target.join(module);
        let lang_dir = module_dir.join("lang");
        fs::create_dir_all(&lang_dir)?;

        let descriptor =
            RepositoryDescriptor::new(name, Version::new(0, 1, 0), vec![module.to_string()]);
        fs::write(target.join("__init__.py"), descriptor_template(&descriptor))?;
        fs::write(target.join("README.md"), readme_template(name))?;
        fs::write(target.join("CHANGELOG.md"), changelog_template(&descriptor))?;
        fs::write(target.join("requirements.txt"), REQUIREMENTS_TEMPLATE)?;
        fs::write(target.join(".gitignore"), GITIGNORE_TEMPLATE)?;
        fs::write(module_dir.join("module.py"), module_template(module))?;
        fs::write(lang_dir.join("en.ini"), LANG_TEMPLATE)?;

        tracing::info!(
            repository = %name,
            module = %module,
            path = %target.display(),
            "Scaffolded new plugin repository"
        );
        Ok(target)
    }
}

impl Default for ScaffoldService {
    fn default() -> Self {
        Self::new()
    }
}

const REQUIREMENTS_TEMPLATE: &str = "# Third-party dependencies, one per line.\n";

const GITIGNORE_TEMPLATE: &str = "__pycache__/\n*.pyc\n";

const LANG_TEMPLATE: &str = "\
[module]
help = Starter module with a single command.

[hello]
help = Say hello back.
reply = Hello!
";

fn descriptor_template(descriptor: &RepositoryDescriptor) -> String {
    let tuple = descriptor
        .modules
        .iter()
        .map(|m| format!("\"{}\"", m))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "name = \"{}\"\nversion = \"{}\"\nmodules = ({},)\n",
        descriptor.name, descriptor.version, tuple
    )
}

fn readme_template(name: &str) -> String {
    format!(
        "# {name}\n\n\
         A pumpkin.py plugin repository.\n\n\
         ## Installation\n\n\
         Load this repository into your pumpkin.py bot and install the\n\
         modules you need.\n"
    )
}

fn changelog_template(descriptor: &RepositoryDescriptor) -> String {
    format!(
        "# {}\n\n## {}\n\n- Initial release.\n",
        descriptor.name, descriptor.version
    )
}

fn module_template(module: &str) -> String {
    let class = upper_camel(module);
    format!(
        "\
import discord
from discord.ext import commands

from core import text, logging

tr = text.Translator(__file__).translate
guild_log = logging.Guild.logger()


class {class}(commands.Cog):
    def __init__(self, bot):
        self.bot = bot

    @commands.command()
    async def hello(self, ctx):
        \"\"\"Say hello back.\"\"\"
        await ctx.send(tr(\"hello\", \"reply\"))


def setup(bot) -> None:
    bot.add_cog({class}(bot))
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::workspace::WorkspaceScanner;

    #[test]
    fn scaffold_produces_a_scannable_repository() {
        let dir = tempfile::tempdir().unwrap();
        let service = ScaffoldService::new();

        let target = service.init("my-plugin", "greet", dir.path()).unwrap();
        assert_eq!(target, dir.path().join("my-plugin"));

        let snapshot = WorkspaceScanner::new(&target).scan().unwrap();
        let descriptor = snapshot.descriptor.as_ref().unwrap();
        assert_eq!(descriptor.name.as_deref(), Some("my-plugin"));
        assert_eq!(descriptor.version.as_deref(), Some("0.1.0"));

        assert_eq!(snapshot.modules.len(), 1);
        let module = &snapshot.modules[0];
        assert_eq!(module.name, "greet");
        assert!(module.dir_present);
        assert!(module.entry_present);
        assert!(module.setup_hook_present);
        assert_eq!(module.lang_files.len(), 1);
        assert_eq!(module.lang_files[0].locale, "en");

        assert!(snapshot.changelog.as_ref().unwrap().has_version(
            &"0.1.0".parse().unwrap()
        ));
        assert!(snapshot.requirements.as_ref().unwrap().entries.is_empty());
    }

    #[test]
    fn module_class_name_is_camel_cased() {
        let dir = tempfile::tempdir().unwrap();
        let target = ScaffoldService::new()
            .init("logger", "voice_log", dir.path())
            .unwrap();

        let content = fs::read_to_string(target.join("voice_log/module.py")).unwrap();
        assert!(content.contains("class VoiceLog(commands.Cog):"));
        assert!(content.contains("bot.add_cog(VoiceLog(bot))"));
    }

    #[test]
    fn reserved_name_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScaffoldService::new()
            .init("core", "greet", dir.path())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidName(_)));
    }

    #[test]
    fn uppercase_name_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScaffoldService::new()
            .init("MyPlugin", "greet", dir.path())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidName(_)));
    }

    #[test]
    fn invalid_module_name_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScaffoldService::new()
            .init("my-plugin", "Greet", dir.path())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidModuleName(_)));
    }

    #[test]
    fn occupied_target_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("my-plugin");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "precious").unwrap();

        let err = ScaffoldService::new()
            .init("my-plugin", "greet", dir.path())
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::TargetExists(_)));
        assert!(target.join("keep.txt").exists());
    }

    #[test]
    fn empty_existing_target_is_filled() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("my-plugin")).unwrap();

        let target = ScaffoldService::new()
            .init("my-plugin", "greet", dir.path())
            .unwrap();
        assert!(target.join("__init__.py").exists());
    }
}
