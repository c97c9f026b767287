// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User (credential) operations.

use agua_core::{AguaError, SeedReport};
use rusqlite::params;
use tracing::debug;

use crate::database::{Database, unique_violation_field};
use crate::models::{CREDENTIAL_COLUMNS, NewUser, StoredCredential, UserId, credential_from_row};

/// Insert a user, returning its new id.
pub async fn insert_user(db: &Database, user: &NewUser) -> Result<UserId, AguaError> {
    user.validate()?;
    let user = user.clone();
    db.connection()
        .call(move |conn| -> Result<UserId, rusqlite::Error> {
            conn.execute(
                "INSERT INTO users (username, email, password_hash, role)
                 VALUES (?1, ?2, ?3, ?4)",
                params![user.username, user.email, user.password_hash, user.role.as_str()],
            )?;
            Ok(UserId(conn.last_insert_rowid()))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a user by username.
pub async fn find_by_username(
    db: &Database,
    username: &str,
) -> Result<Option<StoredCredential>, AguaError> {
    let username = username.to_string();
    db.connection()
        .call(move |conn| -> Result<Option<StoredCredential>, rusqlite::Error> {
            let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM users WHERE username = ?1");
            let mut stmt = conn.prepare(&sql)?;
            match stmt.query_row(params![username], credential_from_row) {
                Ok(cred) => Ok(Some(cred)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert every user that is not already present, inside one transaction.
///
/// A row colliding on username or email is reported as existing and left
/// untouched. Any other failure rolls the whole batch back.
pub async fn insert_missing_users(
    db: &Database,
    users: &[NewUser],
) -> Result<SeedReport, AguaError> {
    for user in users {
        user.validate()?;
    }
    let users = users.to_vec();
    db.connection()
        .call(move |conn| -> Result<SeedReport, rusqlite::Error> {
            let tx = conn.transaction()?;
            let mut report = SeedReport::default();
            for user in &users {
                let inserted = tx.execute(
                    "INSERT INTO users (username, email, password_hash, role)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![user.username, user.email, user.password_hash, user.role.as_str()],
                );
                match inserted {
                    Ok(_) => report.created.push(user.username.clone()),
                    Err(e) => match unique_violation_field(&e) {
                        Some(field) => {
                            debug!(username = %user.username, field = %field, "user already present");
                            report.existing.push(user.username.clone());
                        }
                        None => return Err(e),
                    },
                }
            }
            tx.commit()?;
            Ok(report)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count stored users.
pub async fn count_users(db: &Database) -> Result<u64, AguaError> {
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        })
        .await
        .map(|n| n.max(0) as u64)
        .map_err(crate::database::map_tr_err)
}
