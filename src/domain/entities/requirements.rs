//! Declared requirements and Python import classification

/// One entry of a `requirements.txt`.
#[derive(Debug, Clone)]
pub struct RequirementEntry {
    /// Distribution name, normalised (lowercase, runs of `-_.` as `-`).
    pub name: String,
    /// The line as written.
    pub raw: String,
    /// 1-based line number.
    pub line: usize,
}

/// Parsed `requirements.txt`.
#[derive(Debug, Clone, Default)]
pub struct Requirements {
    pub entries: Vec<RequirementEntry>,
}

impl Requirements {
    /// Parse requirements text. Comments, pip options and direct-URL
    /// entries carry no distribution name and are skipped.
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }
            if line.contains("://") {
                continue;
            }
            let name: String = line
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
                .collect();
            if name.is_empty() {
                continue;
            }
            entries.push(RequirementEntry {
                name: normalize_distribution(&name),
                raw: raw.to_string(),
                line: idx + 1,
            });
        }
        Self { entries }
    }

    pub fn contains(&self, distribution: &str) -> bool {
        let wanted = normalize_distribution(distribution);
        self.entries.iter().any(|e| e.name == wanted)
    }
}

/// An `import X` / `from X import Y` statement found in module code.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    /// Top-level imported name (`dateutil` for `from dateutil.parser import parse`).
    pub module: String,
    /// Repository-relative path of the file containing the statement.
    pub path: String,
    /// 1-based line number.
    pub line: usize,
}

/// Where an imported name comes from, for requirements matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOrigin {
    /// Python standard library.
    Stdlib,
    /// Shipped by the host framework; never listed in requirements.
    Host,
    /// Relative import within the repository.
    Local,
    /// Anything else: must be declared in `requirements.txt`.
    ThirdParty,
}

/// Modules the host framework provides to every loaded repository.
const HOST_MODULES: &[&str] = &["discord", "nextcord", "pie", "core", "database", "sqlalchemy"];

/// Common standard-library top-level modules. Not exhaustive, but
/// covers what plugin code realistically imports.
const STDLIB_MODULES: &[&str] = &[
    "abc", "argparse", "asyncio", "base64", "binascii", "calendar", "collections",
    "contextlib", "copy", "csv", "dataclasses", "datetime", "decimal", "difflib",
    "email", "enum", "functools", "gettext", "glob", "gzip", "hashlib", "hmac",
    "html", "http", "imaplib", "importlib", "inspect", "io", "itertools", "json",
    "locale", "logging", "math", "mimetypes", "operator", "os", "pathlib",
    "pickle", "platform", "pprint", "queue", "random", "re", "secrets", "shlex",
    "shutil", "smtplib", "socket", "sqlite3", "ssl", "statistics", "string",
    "struct", "subprocess", "sys", "tempfile", "textwrap", "threading", "time",
    "traceback", "types", "typing", "unicodedata", "unittest", "urllib", "uuid",
    "warnings", "weakref", "zipfile", "zoneinfo",
];

/// Import names whose distribution is spelled differently on PyPI.
const DISTRIBUTION_ALIASES: &[(&str, &str)] = &[
    ("bs4", "beautifulsoup4"),
    ("dateutil", "python-dateutil"),
    ("dotenv", "python-dotenv"),
    ("PIL", "pillow"),
    ("yaml", "pyyaml"),
];

pub fn classify_import(module: &str) -> ImportOrigin {
    if module.is_empty() || module.starts_with('.') {
        return ImportOrigin::Local;
    }
    if HOST_MODULES.contains(&module) {
        return ImportOrigin::Host;
    }
    if STDLIB_MODULES.contains(&module) {
        return ImportOrigin::Stdlib;
    }
    ImportOrigin::ThirdParty
}

/// PEP 503 name normalisation.
pub fn normalize_distribution(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_sep && !out.is_empty() {
                out.push('-');
            }
            last_sep = true;
        } else {
            out.push(c.to_ascii_lowercase());
            last_sep = false;
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Distribution name an import statement corresponds to.
pub fn import_to_distribution(module: &str) -> String {
    for (import, dist) in DISTRIBUTION_ALIASES {
        if *import == module {
            return (*dist).to_string();
        }
    }
    normalize_distribution(module)
}
