// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Agua integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - temp database, seeded accounts and a ready [`agua_session::App`]
//! - [`FlakyEventStore`] - event store wrapper that can simulate an outage

pub mod failing_store;
pub mod harness;

pub use failing_store::FlakyEventStore;
pub use harness::{TestHarness, TestHarnessBuilder};
