//! Python source scraping
//!
//! The conventions are shallow enough for line patterns, so plugin
//! code is never executed or imported.

use crate::domain::entities::descriptor::DescriptorSource;
use crate::domain::entities::requirements::ImportRecord;
use crate::domain::entities::table::TableDefinition;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static NAME_ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^name\s*(?::[^=\n]+)?=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#)
        .expect("name regex must compile")
});

static VERSION_ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^version\s*(?::[^=\n]+)?=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#)
        .expect("version regex must compile")
});

static MODULES_ASSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)^modules\s*(?::[^=\n]+)?=\s*[(\[]([^)\]]*)[)\]]")
        .expect("modules regex must compile")
});

static STRING_ITEM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("string regex must compile")
});

static SETUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:async\s+)?def\s+setup\s*\(").expect("setup regex must compile")
});

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*import\s+(.+)").expect("import regex must compile")
});

static FROM_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*from\s+(\.*[A-Za-z_][A-Za-z0-9_.]*|\.+)\s+import\s")
        .expect("from-import regex must compile")
});

static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(([^)]*)\)\s*:")
        .expect("class regex must compile")
});

static TABLENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s+__tablename__\s*=\s*(?:"([^"]+)"|'([^']+)')"#)
        .expect("tablename regex must compile")
});

static COLUMN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s+([A-Za-z_][A-Za-z0-9_]*)\s*(?::[^=\n]+)?=\s*(?:[A-Za-z_][A-Za-z0-9_.]*\.)?(?:Column|mapped_column)\s*\(",
    )
    .expect("column regex must compile")
});

fn first_group(caps: &regex_lite::Captures<'_>) -> Option<String> {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

/// Pull `name`, `version` and `modules` assignments out of a
/// repository `__init__.py`.
pub fn scrape_descriptor(content: &str) -> DescriptorSource {
    let name = NAME_ASSIGN_RE.captures(content).and_then(|c| first_group(&c));
    let version = VERSION_ASSIGN_RE
        .captures(content)
        .and_then(|c| first_group(&c));
    let modules = MODULES_ASSIGN_RE.captures(content).map(|c| {
        let inner = c.get(1).map(|m| m.as_str()).unwrap_or("");
        STRING_ITEM_RE
            .captures_iter(inner)
            .filter_map(|c| first_group(&c))
            .collect()
    });
    DescriptorSource {
        name,
        version,
        modules,
    }
}

/// Whether the file defines a module-level `setup(` function.
pub fn has_setup_hook(content: &str) -> bool {
    SETUP_RE.is_match(content)
}

/// Collect top-level imported names with their locations.
pub fn scrape_imports(content: &str, path: &str) -> Vec<ImportRecord> {
    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let number = idx + 1;
        if let Some(caps) = FROM_IMPORT_RE.captures(line) {
            if let Some(m) = caps.get(1) {
                records.push(ImportRecord {
                    module: top_level_name(m.as_str()),
                    path: path.to_string(),
                    line: number,
                });
            }
            continue;
        }
        if let Some(caps) = IMPORT_RE.captures(line) {
            let list = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            for item in list.split(',') {
                let name = item.trim().split_whitespace().next().unwrap_or("");
                if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
                    continue;
                }
                records.push(ImportRecord {
                    module: top_level_name(name),
                    path: path.to_string(),
                    line: number,
                });
            }
        }
    }
    records
}

/// `dateutil.parser` imports `dateutil`; relative paths keep their dot.
fn top_level_name(dotted: &str) -> String {
    if dotted.starts_with('.') {
        return ".".to_string();
    }
    dotted.split('.').next().unwrap_or(dotted).to_string()
}

/// Scan a `database.py` for ORM table classes: the class statement,
/// its `__tablename__`, and its `Column` attributes. A line at column
/// zero ends the class body.
pub fn scrape_tables(content: &str) -> Vec<TableDefinition> {
    let mut tables: Vec<TableDefinition> = Vec::new();
    let mut in_class = false;

    for (idx, line) in content.lines().enumerate() {
        if let Some(caps) = CLASS_RE.captures(line) {
            let bases = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            in_class = bases.to_lowercase().contains("base");
            if in_class {
                tables.push(TableDefinition {
                    class_name: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
                    table_name: None,
                    columns: Vec::new(),
                    line: idx + 1,
                });
            }
            continue;
        }
        if !in_class {
            continue;
        }
        if !line.is_empty() && !line.starts_with([' ', '\t']) {
            in_class = false;
            continue;
        }
        let Some(table) = tables.last_mut() else {
            continue;
        };
        if let Some(caps) = TABLENAME_RE.captures(line) {
            table.table_name = first_group(&caps);
        } else if let Some(caps) = COLUMN_RE.captures(line) {
            if let Some(m) = caps.get(1) {
                table.columns.push(m.as_str().to_string());
            }
        }
    }
    tables
}
