//! SQLite-backed known-repositories index

use crate::application::errors::IndexError;
use crate::domain::entities::descriptor;
use crate::domain::traits::{KnownRepo, KnownRepositories};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Local registry of repository names the host already knows.
pub struct IndexDb {
    conn: Mutex<Connection>,
}

impl IndexDb {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let conn = Connection::open(path)?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_tables()?;
        Ok(db)
    }

    /// Volatile index for tests.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, IndexError> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_tables()?;
        Ok(db)
    }

    fn init_tables(&self) -> Result<(), IndexError> {
        let conn = self.lock()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS known_repositories (
                name TEXT PRIMARY KEY,
                version TEXT NOT NULL,
                registered_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, IndexError> {
        self.conn.lock().map_err(|e| IndexError::Lock(e.to_string()))
    }

    fn get(&self, name: &str) -> Result<Option<KnownRepo>, IndexError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT name, version, registered_at FROM known_repositories WHERE name = ?1",
        )?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            Ok(Some(KnownRepo {
                name: row.get(0)?,
                version: row.get(1)?,
                registered_at: row.get(2)?,
            }))
        } else {
            Ok(None)
        }
    }

    fn insert(&self, name: &str, version: &str) -> Result<(), IndexError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO known_repositories (name, version) VALUES (?1, ?2)",
            rusqlite::params![name, version],
        )?;
        Ok(())
    }
}

#[async_trait]
impl KnownRepositories for IndexDb {
    async fn register(&self, name: &str, version: &str) -> Result<(), IndexError> {
        if !descriptor::well_formed_name(name) || descriptor::reserved_name(name) {
            return Err(IndexError::RejectedName(name.to_string()));
        }
        if self.get(name)?.is_some() {
            return Err(IndexError::Duplicate(name.to_string()));
        }
        self.insert(name, version)?;
        tracing::info!("Registered repository: {} v{}", name, version);
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), IndexError> {
        let rows = {
            let conn = self.lock()?;
            conn.execute("DELETE FROM known_repositories WHERE name = ?1", [name])?
        };
        if rows == 0 {
            return Err(IndexError::NotFound(name.to_string()));
        }
        Ok(())
    }

    async fn lookup(&self, name: &str) -> Result<Option<KnownRepo>, IndexError> {
        self.get(name)
    }

    async fn all(&self) -> Result<Vec<KnownRepo>, IndexError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT name, version, registered_at FROM known_repositories ORDER BY name",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(KnownRepo {
                name: row.get(0)?,
                version: row.get(1)?,
                registered_at: row.get(2)?,
            })
        })?;

        let mut repos = Vec::new();
        for repo in rows {
            repos.push(repo?);
        }
        Ok(repos)
    }

    async fn merge(&self, repos: Vec<KnownRepo>) -> Result<usize, IndexError> {
        let mut added = 0;
        for repo in repos {
            if !descriptor::well_formed_name(&repo.name) || descriptor::reserved_name(&repo.name) {
                tracing::warn!("Skipping rejected name from merge: {}", repo.name);
                continue;
            }
            if self.get(&repo.name)?.is_some() {
                continue;
            }
            self.insert(&repo.name, &repo.version)?;
            added += 1;
        }
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_and_lookup() {
        let db = IndexDb::in_memory().unwrap();
        db.register("mgmt", "1.0.0").await.unwrap();

        let repo = db.lookup("mgmt").await.unwrap().unwrap();
        assert_eq!(repo.name, "mgmt");
        assert_eq!(repo.version, "1.0.0");
        assert!(repo.registered_at.is_some());

        assert!(db.lookup("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let db = IndexDb::in_memory().unwrap();
        db.register("mgmt", "1.0.0").await.unwrap();

        let err = db.register("mgmt", "2.0.0").await.unwrap_err();
        assert!(matches!(err, IndexError::Duplicate(_)));
    }

    #[tokio::test]
    async fn reserved_and_malformed_names_are_rejected() {
        let db = IndexDb::in_memory().unwrap();
        assert!(matches!(
            db.register("core", "1.0.0").await.unwrap_err(),
            IndexError::RejectedName(_)
        ));
        assert!(matches!(
            db.register("My_Repo", "1.0.0").await.unwrap_err(),
            IndexError::RejectedName(_)
        ));
    }

    #[tokio::test]
    async fn remove_missing_name_is_not_found() {
        let db = IndexDb::in_memory().unwrap();
        assert!(matches!(
            db.remove("ghost").await.unwrap_err(),
            IndexError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn merge_skips_existing_and_rejected() {
        let db = IndexDb::in_memory().unwrap();
        db.register("mgmt", "1.0.0").await.unwrap();

        let added = db
            .merge(vec![
                KnownRepo::new("mgmt", "9.9.9"),
                KnownRepo::new("fun", "0.1.0"),
                KnownRepo::new("core", "1.0.0"),
            ])
            .await
            .unwrap();
        assert_eq!(added, 1);

        let all = db.all().await.unwrap();
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["fun", "mgmt"]);
        // The existing registration kept its version.
        assert_eq!(all[1].version, "1.0.0");
    }
}
