// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Agua session application.

use thiserror::Error;

/// The primary error type used across all Agua store traits and core operations.
#[derive(Debug, Error)]
pub enum AguaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, migration).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Insert collided with an existing username or email.
    #[error("identity already exists: duplicate {field}")]
    DuplicateIdentity { field: String },

    /// Credentials did not verify.
    ///
    /// Carries no detail so that an unknown user, a wrong password and a
    /// throttled attempt are indistinguishable to the caller.
    #[error("invalid credentials")]
    AuthFailure,

    /// Lookup miss.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// Malformed or empty input to event creation.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Malformed or empty input to user creation.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),

    /// The operation requires an authenticated session.
    #[error("not authenticated")]
    Unauthenticated,

    /// The session's role does not permit the action.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AguaError {
    /// Shorthand for a [`AguaError::NotFound`] on the given entity.
    pub fn not_found(entity: &str, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            key: key.into(),
        }
    }
}
