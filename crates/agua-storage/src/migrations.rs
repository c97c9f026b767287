// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files under `migrations/` are compiled into the binary via
//! `embed_migrations!` and run automatically when the database is opened.

use agua_core::AguaError;
use tracing::debug;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), AguaError> {
    let report = embedded::migrations::runner()
        .run(conn)
        .map_err(|e| AguaError::Storage {
            source: Box::new(e),
        })?;
    for migration in report.applied_migrations() {
        debug!(migration = %migration, "applied migration");
    }
    Ok(())
}
