//! Lint run orchestration

use crate::application::errors::LintError;
use crate::checks::{create_registry, CheckRegistry};
use crate::domain::entities::LintReport;
use crate::domain::traits::{CheckContext, KnownRepo, KnownRepositories};
use crate::infrastructure::config::LintConfig;
use crate::infrastructure::index::{IndexDb, RemoteIndex};
use crate::infrastructure::workspace::WorkspaceScanner;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

/// Per-run switches from the command line.
#[derive(Debug, Clone, Default)]
pub struct LintOptions {
    pub strict: bool,
    pub offline: bool,
}

/// Runs the check pipeline over one repository.
pub struct LintService {
    registry: CheckRegistry,
    config: LintConfig,
}

impl LintService {
    pub fn new(config: LintConfig) -> Self {
        Self {
            registry: create_registry(),
            config,
        }
    }

    /// Scan the repository, run every enabled check in registration
    /// order, and assemble the report.
    pub async fn lint(
        &self,
        root: impl AsRef<Path>,
        options: &LintOptions,
    ) -> Result<LintReport, LintError> {
        let root = root.as_ref();
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(root = %root.display(), run_id = %run_id, "Starting lint run");

        let snapshot = WorkspaceScanner::new(root).scan()?;
        let index = self.open_index();
        let remote = self.fetch_remote(options).await;

        let ctx = CheckContext {
            snapshot: &snapshot,
            index: index.as_ref().map(|db| db as &dyn KnownRepositories),
            remote: remote.as_deref(),
            base_locale: &self.config.lang.base_locale,
        };

        let mut findings = Vec::new();
        let mut checks_run = 0;
        for check in self.registry.get_all() {
            if !self.config.is_check_enabled(check.id()) {
                tracing::debug!(check = check.id(), "Check disabled");
                continue;
            }
            let check_start = Instant::now();
            let mut found = check.run(&ctx).await?;
            tracing::debug!(
                check = check.id(),
                findings = found.len(),
                duration_ms = check_start.elapsed().as_millis() as u64,
                "Check completed"
            );
            findings.append(&mut found);
            checks_run += 1;
        }

        let strict = options.strict || self.config.checks.strict;
        let report = LintReport::assemble(
            run_id,
            root.display().to_string(),
            started_at,
            start.elapsed().as_millis() as u64,
            checks_run,
            findings,
            strict,
        );

        tracing::info!(
            errors = report.summary.errors,
            warnings = report.summary.warnings,
            verdict = %report.verdict,
            "Lint run finished"
        );

        Ok(report)
    }

    /// The index is optional: a repository can be linted without one,
    /// so open failures degrade to a warning instead of aborting.
    fn open_index(&self) -> Option<IndexDb> {
        if !self.config.index.enabled || !self.config.is_check_enabled("name-collision") {
            return None;
        }
        match IndexDb::new(&self.config.index.path) {
            Ok(db) => Some(db),
            Err(e) => {
                tracing::warn!(
                    "Cannot open index {}: {}",
                    self.config.index.path.display(),
                    e
                );
                None
            }
        }
    }

    async fn fetch_remote(&self, options: &LintOptions) -> Option<Vec<KnownRepo>> {
        if options.offline || !self.config.index.enabled {
            return None;
        }
        let url = self.config.index.remote_url.as_deref()?;
        match RemoteIndex::new(url).fetch().await {
            Ok(repos) => {
                tracing::debug!(entries = repos.len(), "Fetched remote index");
                Some(repos)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch remote index: {}", e);
                None
            }
        }
    }
}
