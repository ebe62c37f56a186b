//! Configuration management

use crate::application::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File the tool looks for in the working directory.
pub const CONFIG_FILE: &str = "pumpkin-lint.yaml";

/// Lint tool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LintConfig {
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub lang: LangConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChecksConfig {
    /// Check ids to skip.
    pub disabled: Vec<String>,
    /// Treat warnings as failures.
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexConfig {
    pub enabled: bool,
    pub path: PathBuf,
    /// JSON index the collision check may consult.
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LangConfig {
    pub base_locale: String,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            checks: ChecksConfig::default(),
            index: IndexConfig::default(),
            lang: LangConfig::default(),
        }
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            disabled: Vec::new(),
            strict: false,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("pumpkin-lint.db"),
            remote_url: None,
        }
    }
}

impl Default for LangConfig {
    fn default() -> Self {
        Self {
            base_locale: "en".to_string(),
        }
    }
}

impl LintConfig {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Explicit path, else `pumpkin-lint.yaml` next to the repository,
    /// else environment-backed defaults.
    pub fn resolve(explicit: Option<&Path>, repo_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = repo_root.join(CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        Ok(Self::load_env())
    }

    /// Check if a check id is enabled
    pub fn is_check_enabled(&self, id: &str) -> bool {
        !self.checks.disabled.iter().any(|d| d == id)
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = LintConfig::default();

        if let Ok(path) = std::env::var("PUMPKIN_LINT_DB") {
            config.index.path = PathBuf::from(path);
        }

        if let Ok(url) = std::env::var("PUMPKIN_LINT_REMOTE") {
            config.index.remote_url = Some(url);
        }

        config
    }
}
