// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row mapping between SQLite rows and the domain types.
//!
//! The canonical types live in `agua-core::types`; this module re-exports
//! them and converts the textual `role` and `date` columns.

use std::str::FromStr;

use rusqlite::Row;
use rusqlite::types::Type;

pub use agua_core::types::{
    CalendarEvent, EventDate, EventId, NewEvent, NewUser, Role, StoredCredential, UserId,
};

/// Column list matching [`credential_from_row`].
pub(crate) const CREDENTIAL_COLUMNS: &str = "id, username, password_hash, role";

/// Column list matching [`event_from_row`].
pub(crate) const EVENT_COLUMNS: &str = "id, date, title, description, color, owner_user_id";

fn conversion_failure(
    idx: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

pub(crate) fn credential_from_row(row: &Row<'_>) -> rusqlite::Result<StoredCredential> {
    let role: String = row.get(3)?;
    Ok(StoredCredential {
        user_id: UserId(row.get(0)?),
        username: row.get(1)?,
        password_hash: row.get(2)?,
        role: Role::from_str(&role).map_err(|e| conversion_failure(3, e))?,
    })
}

pub(crate) fn event_from_row(row: &Row<'_>) -> rusqlite::Result<CalendarEvent> {
    let date: String = row.get(1)?;
    Ok(CalendarEvent {
        id: EventId(row.get(0)?),
        date: EventDate::parse(&date).map_err(|e| conversion_failure(1, e))?,
        title: row.get(2)?,
        description: row.get(3)?,
        color: row.get(4)?,
        owner: UserId(row.get(5)?),
    })
}
