// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sessions and the application dispatcher for the Agua session application.
//!
//! The [`App`] is the central coordinator that:
//! - Verifies login forms through the authenticator
//! - Binds the resulting identity to the caller's [`Session`]
//! - Resolves every navigation through the role-gated router
//! - Reads and writes the session owner's calendar events
//!
//! Sessions are explicit values. A host with a single connection owns one
//! [`Session`]; a host multiplexing connections keeps a [`SessionRegistry`].

pub mod app;
pub mod forms;
pub mod registry;
pub mod session;

pub use app::{App, Body, POST_CREATED, Screen};
pub use forms::{EventForm, LoginForm};
pub use registry::SessionRegistry;
pub use session::{Session, SessionState};
