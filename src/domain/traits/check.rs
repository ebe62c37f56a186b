use crate::application::errors::LintError;
use crate::domain::entities::{Finding, RepositorySnapshot};
use crate::domain::traits::index::KnownRepositories;
use async_trait::async_trait;

/// Check trait - one conformance rule evaluated against a repository
#[async_trait]
pub trait Check: Send + Sync {
    /// Stable identifier used in findings, configuration and output.
    fn id(&self) -> &'static str;

    /// One-line description for listings and logs.
    fn description(&self) -> &'static str;

    /// Evaluate the rule against a scraped repository. Conformance
    /// problems come back as findings; `Err` is reserved for
    /// environmental failure (unreachable index, broken I/O).
    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError>;
}

/// Everything a check may consult while running.
pub struct CheckContext<'a> {
    pub snapshot: &'a RepositorySnapshot,
    /// Known-repositories index, when one is configured.
    pub index: Option<&'a dyn KnownRepositories>,
    /// Entries fetched from a remote index before the run, when any.
    pub remote: Option<&'a [crate::domain::traits::index::KnownRepo]>,
    /// Locale the translations are compared against.
    pub base_locale: &'a str,
}
