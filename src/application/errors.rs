//! Application layer errors

use thiserror::Error;

/// General lint tool errors
#[derive(Error, Debug)]
pub enum LintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Scaffold error: {0}")]
    Scaffold(#[from] ScaffoldError),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Version string errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Not a valid semantic version: '{0}'")]
    Invalid(String),
}

/// Known-repository index errors
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Repository '{0}' is already registered")]
    Duplicate(String),

    #[error("Repository '{0}' not found")]
    NotFound(String),

    #[error("Rejected name: {0}")]
    RejectedName(String),
}

/// Scaffolding errors
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Invalid repository name: {0}")]
    InvalidName(String),

    #[error("Invalid module name: {0}")]
    InvalidModuleName(String),

    #[error("Target already exists and is not empty: {0}")]
    TargetExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
