// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-connection session and its login FSM.
//!
//! States: LoggedOut -> LoggedIn(role) on a successful login, and back to
//! LoggedOut on logout or navigation to `/login`. The identity is a single
//! `Option<Identity>` so user id and role are always set and cleared together.

use agua_core::{AguaError, EventDate, Identity, Role, SessionId};
use agua_router::Route;
use chrono::{DateTime, Local, Utc};
use tracing::{debug, info};

/// States in the session FSM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No identity bound.
    LoggedOut,
    /// Authenticated with the given role.
    LoggedIn(Role),
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::LoggedOut => write!(f, "logged-out"),
            SessionState::LoggedIn(role) => write!(f, "logged-in({role})"),
        }
    }
}

/// The volatile state of one connection.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    identity: Option<Identity>,
    route: Route,
    selected_date: EventDate,
    opened_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A fresh, unauthenticated session on the login route with today's
    /// date selected.
    pub fn new() -> Self {
        Self::with_id(SessionId(uuid::Uuid::new_v4().to_string()))
    }

    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            identity: None,
            route: Route::Login,
            selected_date: EventDate::from_naive(Local::now().date_naive()),
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Bind an authenticated identity, replacing any previous one.
    pub fn begin(&mut self, identity: Identity) {
        if let Some(previous) = self.identity.replace(identity) {
            debug!(session_id = %self.id, previous_user = %previous.user_id, "replacing session identity");
        }
        info!(session_id = %self.id, user_id = %identity.user_id, role = %identity.role, "session started");
    }

    /// The bound identity, or [`AguaError::Unauthenticated`].
    pub fn current(&self) -> Result<Identity, AguaError> {
        self.identity.ok_or(AguaError::Unauthenticated)
    }

    /// Role of the bound identity, if any.
    pub fn role(&self) -> Option<Role> {
        self.identity.map(|i| i.role)
    }

    /// Clear the identity. A no-op when already logged out.
    ///
    /// Returns whether an identity was bound.
    pub fn end(&mut self) -> bool {
        match self.identity.take() {
            Some(identity) => {
                info!(session_id = %self.id, user_id = %identity.user_id, "session ended");
                true
            }
            None => false,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.identity {
            Some(identity) => SessionState::LoggedIn(identity.role),
            None => SessionState::LoggedOut,
        }
    }

    /// Route of the view last shown.
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub(crate) fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    /// Date the calendar view shows.
    pub fn selected_date(&self) -> EventDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: EventDate) {
        self.selected_date = date;
    }
}
