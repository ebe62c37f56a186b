use crate::application::errors::IndexError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// KnownRepositories trait - abstraction for the name index
#[async_trait]
pub trait KnownRepositories: Send + Sync {
    /// Register a name and version, rejecting duplicates.
    async fn register(&self, name: &str, version: &str) -> Result<(), IndexError>;

    /// Delete a registration.
    async fn remove(&self, name: &str) -> Result<(), IndexError>;

    /// Look a name up.
    async fn lookup(&self, name: &str) -> Result<Option<KnownRepo>, IndexError>;

    /// Every registration, sorted by name.
    async fn all(&self) -> Result<Vec<KnownRepo>, IndexError>;

    /// Merge entries from elsewhere, skipping names already present.
    /// Returns how many entries were added.
    async fn merge(&self, repos: Vec<KnownRepo>) -> Result<usize, IndexError>;
}

/// One row of the known-repositories index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownRepo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<String>,
}

impl KnownRepo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            registered_at: None,
        }
    }
}
