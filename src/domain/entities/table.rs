//! Database table declarations scraped from module code

/// One ORM table class found in a module's `database.py`.
#[derive(Debug, Clone)]
pub struct TableDefinition {
    pub class_name: String,
    /// The `__tablename__` value, when the class declares one.
    pub table_name: Option<String>,
    /// Column attribute names in declaration order.
    pub columns: Vec<String>,
    /// 1-based line of the class statement.
    pub line: usize,
}

impl TableDefinition {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

/// `<repo>_<module>_` prefix every table name in the module must carry.
/// Hyphens map to underscores since SQL identifiers cannot contain `-`.
pub fn table_name_prefix(repo: &str, module: &str) -> String {
    format!(
        "{}_{}_",
        repo.replace('-', "_").to_lowercase(),
        module.replace('-', "_").to_lowercase()
    )
}

/// `<Repo><Module>` prefix the class names are expected to carry.
pub fn class_name_prefix(repo: &str, module: &str) -> String {
    format!("{}{}", upper_camel(repo), upper_camel(module))
}

/// UpperCamelCase form of a hyphenated or underscored name
/// (`my-plugin` to `MyPlugin`, `voice_log` to `VoiceLog`).
pub fn upper_camel(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Whether a table name uses the allowed `[a-z0-9_]` alphabet.
pub fn valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
