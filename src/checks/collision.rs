//! Name collision check

use crate::application::errors::LintError;
use crate::domain::entities::descriptor;
use crate::domain::entities::Finding;
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;

const DESCRIPTOR_FILE: &str = "__init__.py";

/// Validates that the repository name is not already taken: first in
/// the local known-repositories index, then in any remote entries
/// fetched for this run.
pub struct NameCollisionCheck;

#[async_trait]
impl Check for NameCollisionCheck {
    fn id(&self) -> &'static str {
        "name-collision"
    }

    fn description(&self) -> &'static str {
        "Repository name is unique among known repositories"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        // A missing or malformed name is the descriptor check's
        // finding; uniqueness only applies to an acceptable one.
        let Some(name) = ctx.snapshot.repo_name() else {
            return Ok(Vec::new());
        };
        if !descriptor::well_formed_name(name) || descriptor::reserved_name(name) {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();

        if let Some(index) = ctx.index {
            if let Some(existing) = index.lookup(name).await? {
                findings.push(
                    Finding::error(
                        self.id(),
                        format!(
                            "Repository name '{}' is already registered (v{})",
                            existing.name, existing.version
                        ),
                    )
                    .with_path(DESCRIPTOR_FILE),
                );
            }
        }

        if findings.is_empty() {
            if let Some(remote) = ctx.remote {
                if let Some(existing) = remote.iter().find(|r| r.name == name) {
                    findings.push(
                        Finding::error(
                            self.id(),
                            format!(
                                "Repository name '{}' is already taken in the remote index (v{})",
                                existing.name, existing.version
                            ),
                        )
                        .with_path(DESCRIPTOR_FILE),
                    );
                }
            }
        }

        Ok(findings)
    }
}
