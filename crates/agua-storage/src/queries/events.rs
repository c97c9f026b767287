// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar event operations. Every read is scoped to one owner.

use agua_core::AguaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{CalendarEvent, EVENT_COLUMNS, EventDate, EventId, NewEvent, UserId, event_from_row};

/// Insert an event and return the stored row.
pub async fn insert_event(db: &Database, event: &NewEvent) -> Result<CalendarEvent, AguaError> {
    event.validate()?;
    let event = event.clone();
    db.connection()
        .call(move |conn| -> Result<CalendarEvent, rusqlite::Error> {
            conn.execute(
                "INSERT INTO events (date, title, description, color, owner_user_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    event.date.to_string(),
                    event.title,
                    event.description,
                    event.color,
                    event.owner.0,
                ],
            )?;
            Ok(CalendarEvent {
                id: EventId(conn.last_insert_rowid()),
                date: event.date,
                title: event.title,
                description: event.description,
                color: event.color,
                owner: event.owner,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List the events `owner` created on `date`, oldest first.
pub async fn list_for_date(
    db: &Database,
    date: EventDate,
    owner: UserId,
) -> Result<Vec<CalendarEvent>, AguaError> {
    db.connection()
        .call(move |conn| -> Result<Vec<CalendarEvent>, rusqlite::Error> {
            let sql = format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE date = ?1 AND owner_user_id = ?2 ORDER BY id ASC"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![date.to_string(), owner.0], event_from_row)?;
            rows.collect()
        })
        .await
        .map_err(crate::database::map_tr_err)
}
