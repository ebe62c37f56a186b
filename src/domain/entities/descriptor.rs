//! Repository descriptor metadata

use crate::domain::entities::version::Version;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z-]+$").expect("name regex must compile"));

/// Names claimed by the host framework itself.
pub const RESERVED_NAMES: &[&str] = &["core", "base"];

/// Whether a repository or module name uses the allowed alphabet
/// (lowercase ASCII letters and `-`).
pub fn well_formed_name(name: &str) -> bool {
    NAME_RE.is_match(name)
}

pub fn reserved_name(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Module directories are imported as Python packages, so their names
/// must be lowercase identifiers.
pub fn well_formed_module_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Raw metadata scraped from a repository `__init__.py`, before any
/// validation. Fields are `None` when the assignment was not found.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSource {
    pub name: Option<String>,
    pub version: Option<String>,
    pub modules: Option<Vec<String>>,
}

/// Validated repository metadata, used when constructing a repository
/// rather than inspecting one.
#[derive(Debug, Clone)]
pub struct RepositoryDescriptor {
    pub name: String,
    pub version: Version,
    pub modules: Vec<String>,
}

impl RepositoryDescriptor {
    pub fn new(name: impl Into<String>, version: Version, modules: Vec<String>) -> Self {
        Self {
            name: name.into(),
            version,
            modules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_and_hyphens() {
        assert!(well_formed_name("my-plugin"));
        assert!(well_formed_name("mgmt"));
        assert!(well_formed_name("a"));
    }

    #[test]
    fn rejects_other_characters() {
        assert!(!well_formed_name(""));
        assert!(!well_formed_name("My-Plugin"));
        assert!(!well_formed_name("my_plugin"));
        assert!(!well_formed_name("plugin2"));
        assert!(!well_formed_name("my plugin"));
    }

    #[test]
    fn reserved_names_are_flagged() {
        assert!(reserved_name("core"));
        assert!(reserved_name("base"));
        assert!(!reserved_name("mgmt"));
    }

    #[test]
    fn module_names_are_python_identifiers() {
        assert!(well_formed_module_name("greet"));
        assert!(well_formed_module_name("react2role"));
        assert!(well_formed_module_name("_private"));
        assert!(!well_formed_module_name("my-module"));
        assert!(!well_formed_module_name("2fast"));
        assert!(!well_formed_module_name("Greet"));
        assert!(!well_formed_module_name(""));
    }
}
