//! Localisation file check

use crate::application::errors::LintError;
use crate::domain::entities::lang::valid_locale_code;
use crate::domain::entities::Finding;
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Validates `lang/` directories: locale file naming, INI shape, a
/// present base locale, and key drift between translations.
pub struct LangCheck;

#[async_trait]
impl Check for LangCheck {
    fn id(&self) -> &'static str {
        "lang"
    }

    fn description(&self) -> &'static str {
        "Locale files parse as INI and keep their keys in step with the base locale"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        let mut findings = Vec::new();

        for module in &ctx.snapshot.modules {
            if !module.lang_dir_present {
                continue;
            }
            let dir = format!("{}/lang", module.name);

            for name in &module.lang_unexpected {
                findings.push(
                    Finding::warning(
                        self.id(),
                        format!("Unexpected entry '{}' in {}", name, dir),
                    )
                    .with_path(format!("{}/{}", dir, name)),
                );
            }

            for lang in &module.lang_files {
                let path = format!("{}/{}.ini", dir, lang.locale);

                if !valid_locale_code(&lang.locale) {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            format!(
                                "Locale file '{}.ini' is not named by a two-letter code",
                                lang.locale
                            ),
                        )
                        .with_path(path.as_str()),
                    );
                }
                for line in &lang.malformed {
                    findings.push(
                        Finding::warning(self.id(), "Line is not a section, key or comment")
                            .with_path(path.as_str())
                            .with_line(*line),
                    );
                }
                for (section, key, line) in &lang.duplicates {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            format!("Duplicate key '{}' in section [{}]", key, section),
                        )
                        .with_path(path.as_str())
                        .with_line(*line),
                    );
                }
            }

            let base = module
                .lang_files
                .iter()
                .find(|l| l.locale == ctx.base_locale);
            let Some(base) = base else {
                if !module.lang_files.is_empty() {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            format!("Base locale '{}' is missing in {}", ctx.base_locale, dir),
                        )
                        .with_path(dir.as_str()),
                    );
                }
                continue;
            };

            let base_keys: BTreeSet<_> = base.key_pairs().into_iter().collect();
            for lang in &module.lang_files {
                if lang.locale == ctx.base_locale {
                    continue;
                }
                let path = format!("{}/{}.ini", dir, lang.locale);
                let keys: BTreeSet<_> = lang.key_pairs().into_iter().collect();

                for (section, key) in base_keys.difference(&keys) {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            format!(
                                "Locale '{}' is missing key '{}' from section [{}]",
                                lang.locale, key, section
                            ),
                        )
                        .with_path(path.as_str()),
                    );
                }
                for (section, key) in keys.difference(&base_keys) {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            format!(
                                "Locale '{}' has key '{}' in section [{}] that '{}' lacks",
                                lang.locale, key, section, ctx.base_locale
                            ),
                        )
                        .with_path(path.as_str()),
                    );
                }
            }
        }

        Ok(findings)
    }
}
