// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event store whose writes or reads can be made to fail on demand.
//!
//! `FlakyEventStore` wraps a real store and returns `AguaError::Storage` while
//! its failure switch is on, so tests can check that a store outage surfaces
//! to the caller without ending the session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use agua_core::{
    AguaError, CalendarEvent, EventDate, EventStore, HealthStatus, NewEvent, PluginAdapter, UserId,
};

/// An [`EventStore`] that can be switched into a failing state.
pub struct FlakyEventStore {
    inner: Arc<dyn EventStore>,
    failing: AtomicBool,
}

impl FlakyEventStore {
    pub fn new(inner: Arc<dyn EventStore>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), AguaError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AguaError::Storage {
                source: "simulated store outage".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PluginAdapter for FlakyEventStore {
    fn name(&self) -> &str {
        "flaky"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, AguaError> {
        if self.failing.load(Ordering::SeqCst) {
            return Ok(HealthStatus::Unhealthy("simulated store outage".to_string()));
        }
        self.inner.health_check().await
    }

    async fn shutdown(&self) -> Result<(), AguaError> {
        self.inner.shutdown().await
    }
}

#[async_trait]
impl EventStore for FlakyEventStore {
    async fn create_event(&self, event: &NewEvent) -> Result<CalendarEvent, AguaError> {
        self.check()?;
        self.inner.create_event(event).await
    }

    async fn list_for_date(
        &self,
        date: EventDate,
        owner: UserId,
    ) -> Result<Vec<CalendarEvent>, AguaError> {
        self.check()?;
        self.inner.list_for_date(date, owner).await
    }
}
