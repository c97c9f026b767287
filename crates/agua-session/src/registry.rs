// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sessions keyed by connection, for hosts serving more than one.

use std::collections::HashMap;

use agua_core::{AguaError, SessionId};
use tracing::debug;

use crate::session::Session;

/// Owns one [`Session`] per open connection.
///
/// The registry is a plain value owned by the host; there is no global
/// instance.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh unauthenticated session and return its id.
    pub fn open(&mut self) -> SessionId {
        let session = Session::new();
        let id = session.id().clone();
        debug!(session_id = %id, "session opened");
        self.sessions.insert(id.clone(), session);
        id
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    /// Run `f` against the session `id`, failing with `NotFound` if it is
    /// not open.
    pub fn with_session<R>(
        &mut self,
        id: &SessionId,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, AguaError> {
        self.sessions
            .get_mut(id)
            .map(f)
            .ok_or_else(|| AguaError::not_found("session", id.to_string()))
    }

    /// Drop the session, returning it if it was open.
    pub fn close(&mut self, id: &SessionId) -> Option<Session> {
        let closed = self.sessions.remove(id);
        if closed.is_some() {
            debug!(session_id = %id, "session closed");
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
