//! Database table naming check

use crate::application::errors::LintError;
use crate::domain::entities::descriptor;
use crate::domain::entities::table::{class_name_prefix, table_name_prefix, valid_table_name};
use crate::domain::entities::Finding;
use crate::domain::traits::{Check, CheckContext};
use async_trait::async_trait;

/// Validates table classes scraped from `database.py`: the
/// `<repo>_<module>_` name prefix, the allowed alphabet, the
/// mandatory `guild_id` column, and the class naming scheme.
pub struct TablesCheck;

#[async_trait]
impl Check for TablesCheck {
    fn id(&self) -> &'static str {
        "tables"
    }

    fn description(&self) -> &'static str {
        "Table names carry the <repo>_<module>_ prefix and a guild_id column"
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Finding>, LintError> {
        // Prefixes need a usable repository name; the descriptor check
        // reports a missing or malformed one.
        let Some(repo) = ctx.snapshot.repo_name() else {
            return Ok(Vec::new());
        };
        if !descriptor::well_formed_name(repo) {
            return Ok(Vec::new());
        }

        let mut findings = Vec::new();

        for module in &ctx.snapshot.modules {
            if !module.database_present {
                continue;
            }
            let path = format!("{}/database.py", module.name);
            let name_prefix = table_name_prefix(repo, &module.name);
            let class_prefix = class_name_prefix(repo, &module.name);

            if module.tables.is_empty() {
                findings.push(
                    Finding::info(
                        self.id(),
                        format!("database.py of '{}' defines no table classes", module.name),
                    )
                    .with_path(path.as_str()),
                );
                continue;
            }

            for table in &module.tables {
                match table.table_name.as_deref() {
                    None => findings.push(
                        Finding::error(
                            self.id(),
                            format!("Table class '{}' does not set __tablename__", table.class_name),
                        )
                        .with_path(path.as_str())
                        .with_line(table.line),
                    ),
                    Some(table_name) => {
                        if !valid_table_name(table_name) {
                            findings.push(
                                Finding::error(
                                    self.id(),
                                    format!(
                                        "Table name '{}' is not lowercase [a-z0-9_]",
                                        table_name
                                    ),
                                )
                                .with_path(path.as_str())
                                .with_line(table.line),
                            );
                        } else if !table_name.starts_with(&name_prefix) {
                            findings.push(
                                Finding::error(
                                    self.id(),
                                    format!(
                                        "Table name '{}' does not start with '{}'",
                                        table_name, name_prefix
                                    ),
                                )
                                .with_path(path.as_str())
                                .with_line(table.line),
                            );
                        }
                    }
                }

                if !table.has_column("guild_id") {
                    findings.push(
                        Finding::error(
                            self.id(),
                            format!("Table class '{}' has no guild_id column", table.class_name),
                        )
                        .with_path(path.as_str())
                        .with_line(table.line),
                    );
                }

                if !table.class_name.starts_with(&class_prefix) {
                    findings.push(
                        Finding::warning(
                            self.id(),
                            format!(
                                "Table class '{}' does not start with '{}'",
                                table.class_name, class_prefix
                            ),
                        )
                        .with_path(path.as_str())
                        .with_line(table.line),
                    );
                }
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::testutil::{context, snapshot_with_descriptor};
    use crate::domain::entities::{ModuleLayout, Severity, TableDefinition};

    fn table(class: &str, name: Option<&str>, columns: &[&str]) -> TableDefinition {
        TableDefinition {
            class_name: class.to_string(),
            table_name: name.map(|n| n.to_string()),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            line: 7,
        }
    }

    fn snapshot_with_tables(repo: &str, module: &str, tables: Vec<TableDefinition>) -> crate::domain::entities::RepositorySnapshot {
        let mut snapshot = snapshot_with_descriptor(repo, "1.0.0", &[module]);
        snapshot.modules = vec![ModuleLayout {
            name: module.to_string(),
            dir_present: true,
            entry_present: true,
            setup_hook_present: true,
            database_present: true,
            tables,
            ..ModuleLayout::default()
        }];
        snapshot
    }

    #[tokio::test]
    async fn conforming_table_passes() {
        let snapshot = snapshot_with_tables(
            "mgmt",
            "verify",
            vec![table(
                "MgmtVerifyGroup",
                Some("mgmt_verify_groups"),
                &["idx", "guild_id", "name"],
            )],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty(), "unexpected: {:?}", findings);
    }

    #[tokio::test]
    async fn wrong_prefix_is_an_error() {
        let snapshot = snapshot_with_tables(
            "mgmt",
            "verify",
            vec![table("MgmtVerifyGroup", Some("verify_groups"), &["guild_id"])],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("mgmt_verify_"));
    }

    #[tokio::test]
    async fn hyphenated_repo_maps_to_underscores() {
        let snapshot = snapshot_with_tables(
            "my-plugin",
            "greet",
            vec![table(
                "MyPluginGreetEntry",
                Some("my_plugin_greet_entries"),
                &["guild_id"],
            )],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert!(findings.is_empty(), "unexpected: {:?}", findings);
    }

    #[tokio::test]
    async fn missing_guild_id_is_an_error() {
        let snapshot = snapshot_with_tables(
            "mgmt",
            "verify",
            vec![table("MgmtVerifyGroup", Some("mgmt_verify_groups"), &["idx", "name"])],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("guild_id"));
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[tokio::test]
    async fn class_name_drift_is_a_warning() {
        let snapshot = snapshot_with_tables(
            "mgmt",
            "verify",
            vec![table("VerifyGroup", Some("mgmt_verify_groups"), &["guild_id"])],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("MgmtVerify"));
    }

    #[tokio::test]
    async fn missing_tablename_is_an_error() {
        let snapshot = snapshot_with_tables(
            "mgmt",
            "verify",
            vec![table("MgmtVerifyGroup", None, &["guild_id"])],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("__tablename__"));
    }

    #[tokio::test]
    async fn empty_database_file_is_an_info() {
        let snapshot = snapshot_with_tables("mgmt", "verify", vec![]);
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
        assert!(findings[0].message.contains("no table classes"));
    }

    #[tokio::test]
    async fn uppercase_table_name_is_an_error() {
        let snapshot = snapshot_with_tables(
            "mgmt",
            "verify",
            vec![table("MgmtVerifyGroup", Some("Mgmt_Verify_Groups"), &["guild_id"])],
        );
        let findings = TablesCheck.run(&context(&snapshot)).await.unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("lowercase"));
    }
}
