// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the store traits and the Agua crates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::AguaError;

/// Canonical textual form of an [`EventDate`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Store-assigned identifier of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned identifier of a calendar event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of one connection's session slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by store health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Store is fully operational.
    Healthy,
    /// Store is operational but experiencing issues.
    Degraded(String),
    /// Store is not operational.
    Unhealthy(String),
}

/// The two fixed access levels.
///
/// Serialized in lowercase, which is also the form stored in the `users.role`
/// column and the `{role}` segment of a route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// Lowercase name as stored and routed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// An authenticated identity: the `(user_id, role)` pair bound to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

/// A user row as read back for credential verification.
#[derive(Clone)]
pub struct StoredCredential {
    pub user_id: UserId,
    pub username: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    pub role: Role,
}

impl StoredCredential {
    /// The identity this credential authenticates as.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            role: self.role,
        }
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// A user row ready for insertion. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    /// Reject empty usernames and emails.
    pub fn validate(&self) -> Result<(), AguaError> {
        if self.username.trim().is_empty() {
            return Err(AguaError::InvalidIdentity(
                "username must not be empty".to_string(),
            ));
        }
        if self.email.trim().is_empty() {
            return Err(AguaError::InvalidIdentity(
                "email must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// A calendar date in canonical `YYYY-MM-DD` form.
///
/// Parsing is strict: `2025-1-5` and `2025-02-30` are both rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventDate(NaiveDate);

impl EventDate {
    /// Parse a canonical date string, failing with [`AguaError::InvalidEvent`].
    pub fn parse(s: &str) -> Result<Self, AguaError> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|e| AguaError::InvalidEvent(format!("malformed date `{s}`: {e}")))?;
        if date.format(DATE_FORMAT).to_string() != s {
            return Err(AguaError::InvalidEvent(format!(
                "date `{s}` is not in canonical YYYY-MM-DD form"
            )));
        }
        Ok(Self(date))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for EventDate {
    type Err = AguaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// An event about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub date: EventDate,
    pub title: String,
    pub description: String,
    pub color: Option<String>,
    pub owner: UserId,
}

impl NewEvent {
    /// Build an event from raw form input, validating the date and title.
    ///
    /// A blank `color` is treated as absent.
    pub fn new(
        date: &str,
        title: &str,
        description: &str,
        color: Option<&str>,
        owner: UserId,
    ) -> Result<Self, AguaError> {
        let event = Self {
            date: EventDate::parse(date.trim())?,
            title: title.trim().to_string(),
            description: description.to_string(),
            color: color
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            owner,
        };
        event.validate()?;
        Ok(event)
    }

    /// Check the invariants a persisted event must satisfy.
    pub fn validate(&self) -> Result<(), AguaError> {
        if self.title.trim().is_empty() {
            return Err(AguaError::InvalidEvent("title must not be empty".to_string()));
        }
        Ok(())
    }
}

/// A persisted calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: EventId,
    pub date: EventDate,
    pub title: String,
    pub description: String,
    pub color: Option<String>,
    pub owner: UserId,
}
