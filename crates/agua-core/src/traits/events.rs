// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event store trait for per-user calendar entries.

use async_trait::async_trait;

use crate::error::AguaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CalendarEvent, EventDate, NewEvent, UserId};

/// Append-only persistence for calendar events.
///
/// Every query is scoped by owner: there is no way to read another user's
/// events through this trait.
#[async_trait]
pub trait EventStore: PluginAdapter {
    /// Validate and insert an event, returning the stored row.
    ///
    /// Fails with [`AguaError::InvalidEvent`] on an empty title.
    async fn create_event(&self, event: &NewEvent) -> Result<CalendarEvent, AguaError>;

    /// All events on `date` owned by `owner`, in insertion order.
    ///
    /// An empty result is not an error.
    async fn list_for_date(
        &self,
        date: EventDate,
        owner: UserId,
    ) -> Result<Vec<CalendarEvent>, AguaError>;
}
