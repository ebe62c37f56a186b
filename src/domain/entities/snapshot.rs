//! Scraped view of one repository tree

use crate::domain::entities::changelog::Changelog;
use crate::domain::entities::descriptor::DescriptorSource;
use crate::domain::entities::module::ModuleLayout;
use crate::domain::entities::requirements::Requirements;
use crate::domain::entities::version::Version;
use std::path::PathBuf;

/// Everything the workspace scanner collects from a repository on
/// disk. Checks read this; they never touch the filesystem themselves.
#[derive(Debug, Clone, Default)]
pub struct RepositorySnapshot {
    pub root: PathBuf,
    /// Metadata from `__init__.py`, `None` when the file is absent.
    pub descriptor: Option<DescriptorSource>,
    /// One layout per declared module, in declaration order.
    pub modules: Vec<ModuleLayout>,
    /// Directories that look like modules but are not declared.
    pub undeclared_modules: Vec<String>,
    /// Parsed `CHANGELOG.md`, `None` when the file is absent.
    pub changelog: Option<Changelog>,
    /// Parsed `requirements.txt`, `None` when the file is absent.
    pub requirements: Option<Requirements>,
}

impl RepositorySnapshot {
    /// Declared repository name, when the descriptor carries one.
    pub fn repo_name(&self) -> Option<&str> {
        self.descriptor.as_ref()?.name.as_deref()
    }

    /// Declared version, when it parses as one.
    pub fn declared_version(&self) -> Option<Version> {
        self.descriptor
            .as_ref()?
            .version
            .as_deref()?
            .parse()
            .ok()
    }
}
