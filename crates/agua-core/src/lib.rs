// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Agua session application.
//!
//! This crate provides the error type, the domain types (roles, identities,
//! calendar events) and the store traits implemented by persistence backends.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AguaError;
pub use types::{
    CalendarEvent, EventDate, EventId, HealthStatus, Identity, NewEvent, NewUser, Role, SessionId,
    StoredCredential, UserId,
};

pub use traits::credentials::SeedReport;
pub use traits::{CredentialStore, EventStore, PluginAdapter};
