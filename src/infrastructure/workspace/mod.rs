//! Repository workspace scanner
//!
//! Walks a plugin repository on disk and scrapes it into a
//! `RepositorySnapshot`. Checks never touch the filesystem; everything
//! they need is collected here.

use crate::application::errors::LintError;
use crate::domain::entities::{
    Changelog, DescriptorSource, LangFile, ModuleLayout, Requirements, RepositorySnapshot,
};
use crate::infrastructure::pysrc;
use std::path::{Path, PathBuf};

/// Scans one repository tree.
pub struct WorkspaceScanner {
    root: PathBuf,
}

impl WorkspaceScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scrape the whole repository.
    pub fn scan(&self) -> Result<RepositorySnapshot, LintError> {
        if !self.root.is_dir() {
            return Err(LintError::NotADirectory(self.root.display().to_string()));
        }

        let descriptor = self.read_descriptor()?;
        let declared: Vec<String> = descriptor
            .as_ref()
            .and_then(|d| d.modules.clone())
            .unwrap_or_default();

        let mut modules = Vec::with_capacity(declared.len());
        for name in &declared {
            modules.push(self.scan_module(name)?);
        }

        Ok(RepositorySnapshot {
            root: self.root.clone(),
            descriptor,
            modules,
            undeclared_modules: self.find_undeclared(&declared)?,
            changelog: self.read_changelog()?,
            requirements: self.read_requirements()?,
        })
    }

    fn read_descriptor(&self) -> Result<Option<DescriptorSource>, LintError> {
        let path = self.root.join("__init__.py");
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(pysrc::scrape_descriptor(&content)))
    }

    fn read_changelog(&self) -> Result<Option<Changelog>, LintError> {
        let path = self.root.join("CHANGELOG.md");
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(Changelog::parse(&content)))
    }

    fn read_requirements(&self) -> Result<Option<Requirements>, LintError> {
        let path = self.root.join("requirements.txt");
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(Requirements::parse(&content)))
    }

    /// Scrape a single declared module's directory.
    fn scan_module(&self, name: &str) -> Result<ModuleLayout, LintError> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Ok(ModuleLayout::missing(name));
        }

        let mut layout = ModuleLayout {
            name: name.to_string(),
            dir_present: true,
            ..ModuleLayout::default()
        };

        let entry = dir.join("module.py");
        if entry.is_file() {
            layout.entry_present = true;
            let content = std::fs::read_to_string(&entry)?;
            layout.setup_hook_present = pysrc::has_setup_hook(&content);
        }

        let database = dir.join("database.py");
        if database.is_file() {
            layout.database_present = true;
            let content = std::fs::read_to_string(&database)?;
            layout.tables = pysrc::scrape_tables(&content);
        }

        for path in collect_python_files(&dir) {
            let content = std::fs::read_to_string(&path)?;
            let relative = self.relative(&path);
            layout.imports.extend(pysrc::scrape_imports(&content, &relative));
        }

        let lang_dir = dir.join("lang");
        if lang_dir.is_dir() {
            layout.lang_dir_present = true;
            self.scan_lang_dir(&lang_dir, &mut layout)?;
        }

        Ok(layout)
    }

    fn scan_lang_dir(&self, lang_dir: &Path, layout: &mut ModuleLayout) -> Result<(), LintError> {
        for entry in std::fs::read_dir(lang_dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }
            if !path.is_file() {
                layout.lang_unexpected.push(file_name.to_string());
                continue;
            }
            match file_name.strip_suffix(".ini") {
                Some(stem) => {
                    let content = std::fs::read_to_string(&path)?;
                    layout.lang_files.push(LangFile::parse(stem, &content));
                }
                None => layout.lang_unexpected.push(file_name.to_string()),
            }
        }
        layout.lang_files.sort_by(|a, b| a.locale.cmp(&b.locale));
        layout.lang_unexpected.sort();
        Ok(())
    }

    /// Directories containing a `module.py` that the descriptor does
    /// not declare.
    fn find_undeclared(&self, declared: &[String]) -> Result<Vec<String>, LintError> {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || name.starts_with("__") {
                continue;
            }
            if declared.iter().any(|d| d == name) {
                continue;
            }
            if path.join("module.py").is_file() {
                found.push(name.to_string());
            }
        }
        found.sort();
        Ok(found)
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Every `.py` file under a directory, hidden entries and caches
/// skipped, sorted for deterministic output.
fn collect_python_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        let entries = match std::fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", current.display(), e);
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') || name == "__pycache__" {
                continue;
            }
            if path.is_dir() {
                stack.push(path);
            } else if name.ends_with(".py") {
                files.push(path);
            }
        }
    }
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn sample_repo(root: &Path) {
        write(
            root,
            "__init__.py",
            "name = \"my-plugin\"\nversion = \"1.0.0\"\nmodules = (\n    \"greet\",\n)\n",
        );
        write(
            root,
            "greet/module.py",
            "import datetime\n\nfrom unidecode import unidecode\n\n\ndef setup(bot) -> None:\n    pass\n",
        );
        write(
            root,
            "greet/database.py",
            "from sqlalchemy import BigInteger, Column, Integer\n\nfrom database import database\n\n\nclass MyPluginGreetEntry(database.base):\n    __tablename__ = \"my_plugin_greet_entries\"\n\n    idx = Column(Integer, primary_key=True)\n    guild_id = Column(BigInteger)\n",
        );
        write(root, "greet/lang/en.ini", "[module]\nhelp = Greet people\n");
        write(root, "greet/lang/cs.ini", "[module]\nhelp = Zdravi lidi\n");
        write(root, "CHANGELOG.md", "# my-plugin\n\n## 1.0.0\n\n- Initial release.\n");
        write(root, "requirements.txt", "unidecode\n");
    }

    #[test]
    fn scans_a_complete_repository() {
        let dir = tempfile::tempdir().unwrap();
        sample_repo(dir.path());

        let snapshot = WorkspaceScanner::new(dir.path()).scan().unwrap();
        assert_eq!(snapshot.repo_name(), Some("my-plugin"));
        assert_eq!(snapshot.modules.len(), 1);

        let greet = &snapshot.modules[0];
        assert!(greet.dir_present);
        assert!(greet.entry_present);
        assert!(greet.setup_hook_present);
        assert_eq!(greet.tables.len(), 1);
        assert_eq!(greet.lang_files.len(), 2);
        assert_eq!(greet.lang_files[0].locale, "cs");
        assert!(greet.imports.iter().any(|i| i.module == "unidecode"));

        assert!(snapshot.changelog.is_some());
        assert!(snapshot.requirements.is_some());
        assert!(snapshot.undeclared_modules.is_empty());
    }

    #[test]
    fn missing_module_directory_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "__init__.py",
            "name = \"my-plugin\"\nversion = \"1.0.0\"\nmodules = (\"stats\",)\n",
        );

        let snapshot = WorkspaceScanner::new(dir.path()).scan().unwrap();
        assert_eq!(snapshot.modules.len(), 1);
        assert!(!snapshot.modules[0].dir_present);
    }

    #[test]
    fn undeclared_module_directories_are_found() {
        let dir = tempfile::tempdir().unwrap();
        sample_repo(dir.path());
        write(dir.path(), "extra/module.py", "def setup(bot):\n    pass\n");
        write(dir.path(), "docs/readme.txt", "not a module\n");

        let snapshot = WorkspaceScanner::new(dir.path()).scan().unwrap();
        assert_eq!(snapshot.undeclared_modules, ["extra"]);
    }

    #[test]
    fn nonexistent_root_is_an_error() {
        let result = WorkspaceScanner::new("/nonexistent/repo").scan();
        assert!(matches!(result, Err(LintError::NotADirectory(_))));
    }

    #[test]
    fn bare_directory_scans_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = WorkspaceScanner::new(dir.path()).scan().unwrap();
        assert!(snapshot.descriptor.is_none());
        assert!(snapshot.modules.is_empty());
        assert!(snapshot.changelog.is_none());
    }
}
