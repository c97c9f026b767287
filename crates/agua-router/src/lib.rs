// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route parsing and role-gated view resolution for the Agua session application.
//!
//! This crate provides:
//! - [`Route`]: a strict parser from path strings to tagged routes
//! - [`resolve`]: the pure function choosing a [`View`] for a route and the
//!   session's role
//!
//! Nothing here touches storage or session state; callers pass the role in.

pub mod route;
pub mod router;

pub use route::{LOGIN_PATH, Route};
pub use router::{NavEntry, View, home_route, nav_routes, resolve, resolve_path};
