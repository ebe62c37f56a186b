//! Requirements check

use crate::application::errors::LintError;
use crate::domain::entities::requirements::{classify_import, import_to_distribution, ImportOrigin};
use crate::domain::entities::{Finding, ImportRecord};
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;
use std::collections::BTreeMap;

const REQUIREMENTS_FILE: &str = "requirements.txt";

/// Matches `requirements.txt` against what the modules import: every
/// entry must be used, and every third-party import must be declared.
pub struct RequirementsCheck;

#[async_trait]
impl Check for RequirementsCheck {
    fn id(&self) -> &'static str {
        "requirements"
    }

    fn description(&self) -> &'static str {
        "requirements.txt lists exactly the third-party imports the modules use"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        let mut findings = Vec::new();

        // Distribution -> first import that needs it.
        let mut used: BTreeMap<String, &ImportRecord> = BTreeMap::new();
        for module in &ctx.snapshot.modules {
            for import in &module.imports {
                if classify_import(&import.module) != ImportOrigin::ThirdParty {
                    continue;
                }
                used.entry(import_to_distribution(&import.module)).or_insert(import);
            }
        }

        let Some(requirements) = &ctx.snapshot.requirements else {
            for (distribution, record) in &used {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!(
                            "Module code imports '{}' but there is no requirements.txt",
                            distribution
                        ),
                    )
                    .with_path(record.path.as_str())
                    .with_line(record.line),
                );
            }
            return Ok(findings);
        };

        for entry in &requirements.entries {
            if !used.contains_key(&entry.name) {
                findings.push(
                    Finding::error(
                        self.id(),
                        format!("Requirement '{}' is not imported by any module", entry.raw.trim()),
                    )
                    .with_path(REQUIREMENTS_FILE)
                    .with_line(entry.line),
                );
            }
        }

        for (distribution, record) in &used {
            if !requirements.contains(distribution) {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!(
                            "Module code imports '{}' but requirements.txt does not list it",
                            distribution
                        ),
                    )
                    .with_path(record.path.as_str())
                    .with_line(record.line),
                );
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{context, snapshot_with_descriptor};
    use crate::domain::entities::{ModuleLayout, Requirements, Severity};

    fn module_with_imports(name: &str, imports: &[(&str, usize)]) -> ModuleLayout {
        ModuleLayout {
            name: name.to_string(),
            dir_present: true,
            entry_present: true,
            setup_hook_present: true,
            imports: imports
                .iter()
                .map(|(module, line)| ImportRecord {
                    module: module.to_string(),
                    path: format!("{}/module.py", name),
                    line: *line,
                })
                .collect(),
            ..ModuleLayout::default()
        }
    }

    #[tokio::test]
    async fn matching_requirements_pass() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![module_with_imports(
            "greet",
            &[("datetime", 1), ("discord", 2), ("unidecode", 3)],
        )];
        snapshot.requirements = Some(Requirements::parse("unidecode\n"));

        let findings = RequirementsCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty(), "unexpected: {:?}", findings);
    }

    #[tokio::test]
    async fn unused_requirement_is_an_error() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![module_with_imports("greet", &[("discord", 1)])];
        snapshot.requirements = Some(Requirements::parse("unidecode\n"));

        let findings = RequirementsCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].line, Some(1));
    }

    #[tokio::test]
    async fn undeclared_import_is_a_warning() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![module_with_imports("greet", &[("unidecode", 4)])];
        snapshot.requirements = Some(Requirements::parse(""));

        let findings = RequirementsCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].path.as_deref(), Some("greet/module.py"));
        assert_eq!(findings[0].line, Some(4));
    }

    #[tokio::test]
    async fn host_and_stdlib_imports_need_no_declaration() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![module_with_imports(
            "greet",
            &[("discord", 1), ("pie", 2), ("sqlalchemy", 3), ("os", 4), (".", 5)],
        )];

        let findings = RequirementsCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn alias_resolves_before_matching() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["remind"]);
        snapshot.modules = vec![module_with_imports("remind", &[("dateutil", 2)])];
        snapshot.requirements = Some(Requirements::parse("python-dateutil>=2.8\n"));

        let findings = RequirementsCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty(), "unexpected: {:?}", findings);
    }

    #[tokio::test]
    async fn missing_file_with_third_party_imports_is_a_warning() {
        let mut snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        snapshot.modules = vec![module_with_imports("greet", &[("unidecode", 3)])];

        let findings = RequirementsCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("no requirements.txt"));
    }
}
