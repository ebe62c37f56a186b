//! Domain entities - Core business objects with no external dependencies

pub mod changelog;
pub mod descriptor;
pub mod finding;
pub mod lang;
pub mod module;
pub mod requirements;
pub mod snapshot;
pub mod table;
pub mod version;

pub use changelog::{Changelog, ChangelogSection};
pub use descriptor::{DescriptorSource, RepositoryDescriptor};
pub use finding::{Finding, LintReport, ReportSummary, Severity, Verdict};
pub use lang::LangFile;
pub use module::ModuleLayout;
pub use requirements::{ImportOrigin, ImportRecord, RequirementEntry, Requirements};
pub use snapshot::RepositorySnapshot;
pub use table::TableDefinition;
pub use version::Version;
