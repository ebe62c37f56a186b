//! Changelog check

use crate::application::errors::LintError;
use crate::domain::entities::Finding;
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;

const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Validates the changelog skeleton: one `##` section per version,
/// newest first, with a section for the declared version. Bodies are
/// free text and never inspected.
pub struct ChangelogCheck;

#[async_trait]
impl Check for ChangelogCheck {
    fn id(&self) -> &'static str {
        "changelog"
    }

    fn description(&self) -> &'static str {
        "CHANGELOG.md has a version section per release, newest first"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        let mut findings = Vec::new();

        let Some(changelog) = &ctx.snapshot.changelog else {
            findings.push(
                Finding::warning(self.id(), "CHANGELOG.md not found").with_path(CHANGELOG_FILE),
            );
            return Ok(findings);
        };

        if changelog.sections.is_empty() {
            findings.push(
                Finding::warning(self.id(), "Changelog has no version sections")
                    .with_path(CHANGELOG_FILE),
            );
            return Ok(findings);
        }

        for section in &changelog.sections {
            if section.version.is_none() {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!("Heading '{}' is not a semantic version", section.heading),
                    )
                    .with_path(CHANGELOG_FILE)
                    .with_line(section.line),
                );
            }
        }

        let versions = changelog.versions();
        for pair in versions.windows(2) {
            if pair[0] <= pair[1] {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!(
                            "Version sections are not newest first: {} is followed by {}",
                            pair[0], pair[1]
                        ),
                    )
                    .with_path(CHANGELOG_FILE),
                );
                break;
            }
        }

        if let Some(current) = ctx.snapshot.declared_version() {
            if !changelog.has_version(&current) {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!("Declared version {} has no changelog section", current),
                    )
                    .with_path(CHANGELOG_FILE),
                );
            }
        }

        Ok(findings)
    }
}
