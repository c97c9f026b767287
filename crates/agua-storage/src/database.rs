// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All statements are serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer: query modules accept
//! `&Database` and call through `connection().call()`.
//!
//! Do NOT create additional Connection instances for writes.

use std::path::Path;
use std::time::Duration;

use agua_config::model::StorageConfig;
use agua_core::AguaError;
use rusqlite::ErrorCode;
use tracing::{debug, info};

use crate::migrations;

/// Handle to the application database.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database at `path` with default settings
    /// and run pending migrations.
    pub async fn open(path: &str) -> Result<Self, AguaError> {
        let config = StorageConfig {
            database_path: path.to_string(),
            ..StorageConfig::default()
        };
        Self::open_with_config(&config).await
    }

    /// Open the database described by `config` and run pending migrations.
    pub async fn open_with_config(config: &StorageConfig) -> Result<Self, AguaError> {
        let path = config.database_path.clone();
        if let Some(parent) = Path::new(&path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AguaError::Storage {
                source: Box::new(e),
            })?;
        }

        let conn = tokio_rusqlite::Connection::open(&path)
            .await
            .map_err(|e| AguaError::Storage {
                source: Box::new(e),
            })?;

        let wal_mode = config.wal_mode;
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        conn.call(move |conn| -> Result<(), AguaError> {
            apply_pragmas(conn, wal_mode, busy_timeout).map_err(map_sqlite_err)?;
            migrations::run_migrations(conn)
        })
        .await
        .map_err(flatten_call_err)?;

        info!(path = %path, wal_mode, "database opened");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Run `PRAGMA integrity_check`, returning its rows (`["ok"]` when sound).
    pub async fn integrity_check(&self) -> Result<Vec<String>, AguaError> {
        self.conn
            .call(|conn| -> Result<Vec<String>, rusqlite::Error> {
                let mut stmt = conn.prepare("PRAGMA integrity_check")?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint the WAL and close the connection.
    pub async fn close(self) -> Result<(), AguaError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.close().await.map_err(|e| AguaError::Storage {
            source: Box::new(e),
        })?;
        debug!("database closed");
        Ok(())
    }
}

fn apply_pragmas(
    conn: &rusqlite::Connection,
    wal_mode: bool,
    busy_timeout: Duration,
) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    if wal_mode {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(journal_mode = %mode, "journal mode set");
    }
    Ok(())
}

/// Convert a tokio-rusqlite error into an [`AguaError`], classifying
/// constraint violations.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> AguaError {
    match e {
        tokio_rusqlite::Error::Error(inner) => map_sqlite_err(inner),
        other => AguaError::Storage {
            source: Box::new(other),
        },
    }
}

/// Unwrap a domain error raised inside a `call` closure.
pub(crate) fn flatten_call_err(e: tokio_rusqlite::Error<AguaError>) -> AguaError {
    match e {
        tokio_rusqlite::Error::Error(inner) => inner,
        tokio_rusqlite::Error::ConnectionClosed => AguaError::Storage {
            source: "database connection closed".into(),
        },
        other => AguaError::Storage {
            source: other.to_string().into(),
        },
    }
}

/// Map a rusqlite error, turning UNIQUE violations into
/// [`AguaError::DuplicateIdentity`].
pub(crate) fn map_sqlite_err(e: rusqlite::Error) -> AguaError {
    match unique_violation_field(&e) {
        Some(field) => AguaError::DuplicateIdentity { field },
        None => AguaError::Storage {
            source: Box::new(e),
        },
    }
}

/// Column name of a violated UNIQUE constraint, e.g. `username` for
/// `UNIQUE constraint failed: users.username`.
pub(crate) fn unique_violation_field(e: &rusqlite::Error) -> Option<String> {
    match e {
        rusqlite::Error::SqliteFailure(err, msg)
            if err.code == ErrorCode::ConstraintViolation
                && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            let field = msg
                .as_deref()
                .and_then(|m| m.rsplit('.').next())
                .map(|f| f.trim().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            Some(field)
        }
        _ => None,
    }
}
