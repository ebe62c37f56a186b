//! Per-module layout facts

use crate::domain::entities::lang::LangFile;
use crate::domain::entities::requirements::ImportRecord;
use crate::domain::entities::table::TableDefinition;

/// What a declared module's directory actually contains.
#[derive(Debug, Clone, Default)]
pub struct ModuleLayout {
    pub name: String,
    pub dir_present: bool,
    /// `module.py` exists.
    pub entry_present: bool,
    /// `module.py` defines a `setup(` function.
    pub setup_hook_present: bool,
    /// `database.py` exists.
    pub database_present: bool,
    /// Table classes scraped from `database.py`.
    pub tables: Vec<TableDefinition>,
    /// `lang/` directory exists.
    pub lang_dir_present: bool,
    /// Parsed `lang/*.ini` files.
    pub lang_files: Vec<LangFile>,
    /// File names under `lang/` that do not follow `<locale>.ini`.
    pub lang_unexpected: Vec<String>,
    /// Import statements from every `.py` file in the module.
    pub imports: Vec<ImportRecord>,
}

impl ModuleLayout {
    /// Layout for a declared module whose directory does not exist.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
