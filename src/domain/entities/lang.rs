//! Localisation INI files

use std::collections::BTreeMap;

/// One `lang/<locale>.ini` file of a module.
#[derive(Debug, Clone)]
pub struct LangFile {
    /// Locale code taken from the file stem (`en`, `cs`).
    pub locale: String,
    /// Section name to key-to-first-line map, in sorted order.
    pub sections: BTreeMap<String, BTreeMap<String, usize>>,
    /// Keys seen more than once within a section: (section, key, line).
    pub duplicates: Vec<(String, String, usize)>,
    /// 1-based lines that are neither section, key, comment nor blank.
    pub malformed: Vec<usize>,
}

impl LangFile {
    pub fn parse(locale: impl Into<String>, content: &str) -> Self {
        let mut sections: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        let mut duplicates = Vec::new();
        let mut malformed = Vec::new();
        let mut current: Option<String> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            let number = idx + 1;
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                let name = name.trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }
            let Some((key, _value)) = line.split_once('=') else {
                malformed.push(number);
                continue;
            };
            let key = key.trim().to_string();
            if key.is_empty() {
                malformed.push(number);
                continue;
            }
            match &current {
                Some(section) => {
                    let keys = sections.entry(section.clone()).or_default();
                    if keys.contains_key(&key) {
                        duplicates.push((section.clone(), key, number));
                    } else {
                        keys.insert(key, number);
                    }
                }
                // A key before any section header has no home.
                None => malformed.push(number),
            }
        }

        Self {
            locale: locale.into(),
            sections,
            duplicates,
            malformed,
        }
    }

    /// Every (section, key) pair, for drift comparison across locales.
    pub fn key_pairs(&self) -> Vec<(String, String)> {
        self.sections
            .iter()
            .flat_map(|(section, keys)| {
                keys.keys().map(move |k| (section.clone(), k.clone()))
            })
            .collect()
    }
}

/// Locale file names are lowercase two-letter codes.
pub fn valid_locale_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase())
}
