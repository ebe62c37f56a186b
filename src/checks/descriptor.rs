//! Descriptor metadata check

use crate::application::errors::LintError;
use crate::domain::entities::descriptor;
use crate::domain::entities::{Finding, Version};
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;

const DESCRIPTOR_FILE: &str = "__init__.py";

/// Validates the repository metadata: name pattern, reserved words,
/// version format and the declared module list.
pub struct DescriptorCheck;

#[async_trait]
impl Check for DescriptorCheck {
    fn id(&self) -> &'static str {
        "descriptor"
    }

    fn description(&self) -> &'static str {
        "Repository metadata declares a valid name, version and module list"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        let mut findings = Vec::new();

        let Some(source) = &ctx.snapshot.descriptor else {
            findings.push(
                Finding::error(self.id(), "No __init__.py with repository metadata found")
                    .with_path(DESCRIPTOR_FILE),
            );
            return Ok(findings);
        };

        match source.name.as_deref() {
            None => findings.push(
                Finding::error(self.id(), "Metadata does not assign `name`")
                    .with_path(DESCRIPTOR_FILE),
            ),
            Some(name) if !descriptor::well_formed_name(name) => findings.push(
                Finding::error(
                    self.id(),
                    format!(
                        "Repository name '{}' does not match the pattern [a-z-]+",
                        name
                    ),
                )
                .with_path(DESCRIPTOR_FILE),
            ),
            Some(name) if descriptor::reserved_name(name) => findings.push(
                Finding::error(
                    self.id(),
                    format!("Repository name '{}' is a reserved word", name),
                )
                .with_path(DESCRIPTOR_FILE),
            ),
            Some(_) => {}
        }

        match source.version.as_deref() {
            None => findings.push(
                Finding::error(self.id(), "Metadata does not assign `version`")
                    .with_path(DESCRIPTOR_FILE),
            ),
            Some(version) if !Version::is_valid(version) => findings.push(
                Finding::error(
                    self.id(),
                    format!("Version '{}' is not a valid semantic version", version),
                )
                .with_path(DESCRIPTOR_FILE),
            ),
            Some(_) => {}
        }

        match &source.modules {
            None => findings.push(
                Finding::error(self.id(), "Metadata does not assign `modules`")
                    .with_path(DESCRIPTOR_FILE),
            ),
            Some(modules) if modules.is_empty() => findings.push(
                Finding::error(self.id(), "Declared module list is empty")
                    .with_path(DESCRIPTOR_FILE),
            ),
            Some(modules) => {
                for module in modules {
                    if !descriptor::well_formed_module_name(module) {
                        findings.push(
                            Finding::error(
                                self.id(),
                                format!(
                                    "Module name '{}' is not a lowercase Python identifier",
                                    module
                                ),
                            )
                            .with_path(DESCRIPTOR_FILE),
                        );
                    }
                }
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{context, snapshot_with_descriptor};
    use crate::domain::entities::RepositorySnapshot;

    #[tokio::test]
    async fn conforming_descriptor_passes() {
        let snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["greet"]);
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty(), "unexpected: {:?}", findings);
    }

    #[tokio::test]
    async fn reserved_name_is_an_error() {
        let snapshot = snapshot_with_descriptor("core", "1.0.0", &["greet"]);
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("reserved"));
    }

    #[tokio::test]
    async fn short_version_is_an_error() {
        let snapshot = snapshot_with_descriptor("my-plugin", "1.0", &["greet"]);
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("semantic version"));
    }

    #[tokio::test]
    async fn missing_metadata_file_is_an_error() {
        let snapshot = RepositorySnapshot::default();
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path.as_deref(), Some("__init__.py"));
    }

    #[tokio::test]
    async fn uppercase_name_fails_the_pattern() {
        let snapshot = snapshot_with_descriptor("My-Plugin", "1.0.0", &["greet"]);
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("pattern"));
    }

    #[tokio::test]
    async fn empty_module_list_is_an_error() {
        let snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &[]);
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("empty"));
    }

    #[tokio::test]
    async fn hyphenated_module_name_is_an_error() {
        let snapshot = snapshot_with_descriptor("my-plugin", "1.0.0", &["my-module"]);
        let findings = DescriptorCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("my-module"));
    }
}
