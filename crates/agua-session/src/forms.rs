// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named form bindings passed into [`crate::App`] handlers.

use agua_core::{AguaError, EventDate, NewEvent, UserId};
use secrecy::SecretString;

/// Login form submission.
#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

/// New-event form on the calendar view. The date comes from the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub color: Option<String>,
}

impl EventForm {
    /// Parse `title | description | color`, where the last two parts are
    /// optional.
    pub fn parse(input: &str) -> Self {
        let mut parts = input.splitn(3, '|').map(str::trim);
        let title = parts.next().unwrap_or_default().to_string();
        let description = parts.next().unwrap_or_default().to_string();
        let color = parts.next().filter(|c| !c.is_empty()).map(str::to_string);
        Self {
            title,
            description,
            color,
        }
    }

    /// Bind the form to a date and owner, validating it.
    pub fn to_new_event(&self, date: EventDate, owner: UserId) -> Result<NewEvent, AguaError> {
        NewEvent::new(
            &date.to_string(),
            &self.title,
            &self.description,
            self.color.as_deref(),
            owner,
        )
    }
}
