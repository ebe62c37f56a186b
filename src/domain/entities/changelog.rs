//! Changelog structure
//!
//! Only the `##` version headings carry meaning; section bodies are
//! free-form and never interpreted.

use crate::domain::entities::version::Version;

/// One `##` section of a changelog.
#[derive(Debug, Clone)]
pub struct ChangelogSection {
    /// Heading text with the `##` marker stripped.
    pub heading: String,
    /// The heading parsed as a version, when it is one.
    pub version: Option<Version>,
    /// 1-based line of the heading.
    pub line: usize,
}

/// A parsed changelog: its version sections in file order.
#[derive(Debug, Clone, Default)]
pub struct Changelog {
    pub sections: Vec<ChangelogSection>,
}

impl Changelog {
    /// Scan changelog text for `##` headings. Anything that is not a
    /// `##` heading belongs to the preceding section and is skipped.
    pub fn parse(content: &str) -> Self {
        let mut sections = Vec::new();
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            let Some(rest) = line.strip_prefix("##") else {
                continue;
            };
            // "###" and deeper are sub-headings inside a body.
            if rest.starts_with('#') {
                continue;
            }
            let heading = rest.trim().to_string();
            let version = heading.parse::<Version>().ok();
            sections.push(ChangelogSection {
                heading,
                version,
                line: idx + 1,
            });
        }
        Self { sections }
    }

    /// Versions of every section whose heading parsed as one, in file
    /// order (newest first in a conforming changelog).
    pub fn versions(&self) -> Vec<&Version> {
        self.sections.iter().filter_map(|s| s.version.as_ref()).collect()
    }

    pub fn has_version(&self, version: &Version) -> bool {
        self.versions().iter().any(|v| *v == version)
    }
}
