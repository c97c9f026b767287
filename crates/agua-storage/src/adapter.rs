// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the credential and event store traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use agua_config::model::StorageConfig;
use agua_core::{
    AguaError, CalendarEvent, CredentialStore, EventDate, EventStore, HealthStatus, NewEvent,
    NewUser, PluginAdapter, SeedReport, StoredCredential, UserId,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed store for users and calendar events.
///
/// The database is opened lazily by [`SqliteStore::initialize`]; every trait
/// method fails with a storage error until then.
pub struct SqliteStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStore {
    /// Create a store for the configured database. Nothing is opened yet.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Create and initialize in one step.
    pub async fn open(config: StorageConfig) -> Result<Self, AguaError> {
        let store = Self::new(config);
        store.initialize().await?;
        Ok(store)
    }

    /// Open the database, applying pragmas and pending migrations.
    pub async fn initialize(&self) -> Result<(), AguaError> {
        let db = Database::open_with_config(&self.config).await?;
        self.db.set(db).map_err(|_| AguaError::Storage {
            source: "store already initialized".into(),
        })?;
        info!(path = %self.config.database_path, "sqlite store initialized");
        Ok(())
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &str {
        &self.config.database_path
    }

    /// Run SQLite's integrity check on the open database.
    pub async fn integrity_check(&self) -> Result<Vec<String>, AguaError> {
        self.db()?.integrity_check().await
    }

    fn db(&self) -> Result<&Database, AguaError> {
        self.db.get().ok_or_else(|| AguaError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    /// Degraded when WAL is configured but SQLite kept another journal mode
    /// (in-memory databases, some network filesystems).
    async fn health_check(&self) -> Result<HealthStatus, AguaError> {
        let db = self.db()?;
        let journal_mode = db
            .connection()
            .call(|conn| -> Result<String, rusqlite::Error> {
                conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        if self.config.wal_mode && !journal_mode.eq_ignore_ascii_case("wal") {
            return Ok(HealthStatus::Degraded(format!(
                "journal mode is {journal_mode}, expected wal"
            )));
        }
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), AguaError> {
        if let Some(db) = self.db.get() {
            db.connection()
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                    Ok(())
                })
                .await
                .map_err(crate::database::map_tr_err)?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn create_user(&self, user: &NewUser) -> Result<UserId, AguaError> {
        queries::users::insert_user(self.db()?, user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<StoredCredential, AguaError> {
        queries::users::find_by_username(self.db()?, username)
            .await?
            .ok_or_else(|| AguaError::not_found("user", username))
    }

    async fn insert_missing_users(&self, users: &[NewUser]) -> Result<SeedReport, AguaError> {
        queries::users::insert_missing_users(self.db()?, users).await
    }

    async fn count_users(&self) -> Result<u64, AguaError> {
        queries::users::count_users(self.db()?).await
    }
}

#[async_trait]
impl EventStore for SqliteStore {
    async fn create_event(&self, event: &NewEvent) -> Result<CalendarEvent, AguaError> {
        queries::events::insert_event(self.db()?, event).await
    }

    async fn list_for_date(
        &self,
        date: EventDate,
        owner: UserId,
    ) -> Result<Vec<CalendarEvent>, AguaError> {
        queries::events::list_for_date(self.db()?, date, owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agua_core::Role;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            ..StorageConfig::default()
        }
    }

    #[tokio::test]
    async fn sqlite_store_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        store.initialize().await.unwrap();
        assert!(store.initialize().await.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_tracks_initialization() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let store = SqliteStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.health_check().await.is_err());
        store.initialize().await.unwrap();
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn in_memory_database_reports_degraded_journal() {
        let store = SqliteStore::open(make_config(":memory:")).await.unwrap();
        let status = store.health_check().await.unwrap();
        assert!(
            matches!(&status, HealthStatus::Degraded(msg) if msg.contains("memory")),
            "got: {status:?}"
        );

        let plain = SqliteStore::open(StorageConfig {
            wal_mode: false,
            ..make_config(":memory:")
        })
        .await
        .unwrap();
        assert_eq!(plain.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn find_by_username_miss_is_not_found() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(make_config(dir.path().join("nf.db").to_str().unwrap()))
            .await
            .unwrap();
        let err = store.find_by_username("nobody").await.unwrap_err();
        assert!(matches!(err, AguaError::NotFound { .. }), "got: {err:?}");
    }

    #[tokio::test]
    async fn users_and_events_persist_across_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("persist.db");
        let config = make_config(db_path.to_str().unwrap());

        let store = SqliteStore::open(config.clone()).await.unwrap();
        let owner = store
            .create_user(&NewUser {
                username: "carla".into(),
                email: "carla@agua".into(),
                password_hash: "hash".into(),
                role: Role::Admin,
            })
            .await
            .unwrap();
        let event = NewEvent::new("2025-12-24", "Ceia", "", Some("green"), owner).unwrap();
        store.create_event(&event).await.unwrap();
        store.shutdown().await.unwrap();
        drop(store);

        let store = SqliteStore::open(config).await.unwrap();
        let cred = store.find_by_username("carla").await.unwrap();
        assert_eq!(cred.identity().role, Role::Admin);
        let events = store.list_for_date(event.date, owner).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Ceia");
        assert_eq!(store.count_users().await.unwrap(), 1);
    }
}
