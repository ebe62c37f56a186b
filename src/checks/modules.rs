//! Module layout check

use crate::application::errors::LintError;
use crate::domain::entities::Finding;
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;

/// Validates that every declared module has a directory with a
/// loadable entry file, and flags module-like directories the
/// descriptor does not declare.
pub struct ModulesCheck;

#[async_trait]
impl Check for ModulesCheck {
    fn id(&self) -> &'static str {
        "modules"
    }

    fn description(&self) -> &'static str {
        "Every declared module has a directory with module.py and a setup hook"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        // Without a descriptor there is no declaration to compare
        // against; the descriptor check reports that.
        if ctx.snapshot.descriptor.is_none() {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();

        for module in &ctx.snapshot.modules {
            if !module.dir_present {
                findings.push(
                    Finding::error(
                        self.id(),
                        format!("Declared module '{}' has no directory", module.name),
                    )
                    .with_path(module.name.as_str()),
                );
                continue;
            }
            if !module.entry_present {
                findings.push(
                    Finding::error(
                        self.id(),
                        format!("Module '{}' is missing module.py", module.name),
                    )
                    .with_path(format!("{}/module.py", module.name)),
                );
                continue;
            }
            if !module.setup_hook_present {
                findings.push(
                    Finding::error(
                        self.id(),
                        format!("module.py of '{}' does not define a setup function", module.name),
                    )
                    .with_path(format!("{}/module.py", module.name)),
                );
            }
        }

        for name in &ctx.snapshot.undeclared_modules {
            findings.push(
                Finding::warning(
                    self.id(),
                    format!("Directory '{}' looks like a module but is not declared", name),
                )
                .with_path(name.as_str()),
            );
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{context, snapshot_with_descriptor};
    use crate::domain::entities::{ModuleLayout, RepositorySnapshot, Severity};

    fn present_module(name: &str) -> ModuleLayout {
        ModuleLayout {
            name: name.to_string(),
            dir_present: true,
            entry_present: true,
            setup_hook_present: true,
            ..ModuleLayout::default()
        }
    }

    #[tokio::test]
    async fn complete_modules_pass() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![present_module("greet")];
        let findings = ModulesCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["stats"]);
        snapshot.modules = vec![ModuleLayout::missing("stats")];
        let findings = ModulesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert!(findings[0].message.contains("stats"));
    }

    #[tokio::test]
    async fn missing_entry_file_is_an_error() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        let mut module = present_module("greet");
        module.entry_present = false;
        module.setup_hook_present = false;
        snapshot.modules = vec![module];

        let findings = ModulesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("module.py"));
    }

    #[tokio::test]
    async fn missing_setup_hook_is_an_error() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        let mut module = present_module("greet");
        module.setup_hook_present = false;
        snapshot.modules = vec![module];

        let findings = ModulesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("setup"));
    }

    #[tokio::test]
    async fn undeclared_directory_is_a_warning() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![present_module("greet")];
        snapshot.undeclared_modules = vec!["extra".to_string()];

        let findings = ModulesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[tokio::test]
    async fn silent_without_descriptor() {
        let mut snapshot = RepositorySnapshot::default();
        snapshot.undeclared_modules = vec!["greet".to_string()];
        let findings = ModulesCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty());
    }
}
