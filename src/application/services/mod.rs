//! Application services - Business logic orchestration

pub mod lint_service;
pub mod scaffold_service;

pub use lint_service::{LintOptions, LintService};
pub use scaffold_service::ScaffoldService;
