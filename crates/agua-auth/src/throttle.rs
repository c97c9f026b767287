// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-username failed-login throttle.
//!
//! Failures are counted per username. Once `max_failures` accumulate within
//! one window the username is locked until the window, measured from the
//! locking failure, has elapsed. Records idle for longer than one window are
//! swept at most once per window. All methods take the current [`Instant`]
//! explicitly so behavior is deterministic under test.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use agua_config::model::SecurityConfig;

#[derive(Debug, Clone, Copy)]
struct FailureRecord {
    count: u32,
    last_failure: Instant,
    locked_until: Option<Instant>,
}

/// Tracks consecutive login failures and lockouts.
#[derive(Debug)]
pub struct LoginThrottle {
    max_failures: u32,
    window: Duration,
    records: HashMap<String, FailureRecord>,
    last_sweep: Option<Instant>,
}

impl LoginThrottle {
    /// `max_failures == 0` disables throttling entirely.
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            max_failures,
            window,
            records: HashMap::new(),
            last_sweep: None,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::new(
            config.max_failed_logins,
            Duration::from_secs(config.lockout_secs),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.max_failures > 0
    }

    /// Whether `username` is currently locked out. Expired entries are
    /// dropped as a side effect.
    pub fn is_locked(&mut self, username: &str, now: Instant) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let Some(record) = self.records.get(username) else {
            return false;
        };
        match record.locked_until {
            Some(until) if now < until => true,
            Some(_) => {
                self.records.remove(username);
                false
            }
            None => false,
        }
    }

    /// Count a failure. Returns `true` if this failure triggered a lockout.
    pub fn record_failure(&mut self, username: &str, now: Instant) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.sweep(now);
        let window = self.window;
        let record = self
            .records
            .entry(username.to_string())
            .or_insert(FailureRecord {
                count: 0,
                last_failure: now,
                locked_until: None,
            });

        // A stale streak starts over.
        if now.saturating_duration_since(record.last_failure) > window {
            record.count = 0;
            record.locked_until = None;
        }
        record.count = record.count.saturating_add(1);
        record.last_failure = now;

        if record.count >= self.max_failures && record.locked_until.is_none() {
            record.locked_until = Some(now + window);
            return true;
        }
        false
    }

    /// Drop records whose last failure is more than a window old. A lock
    /// never outlives the window after the failure that set it, so these
    /// records carry neither a streak nor an active lock.
    fn sweep(&mut self, now: Instant) {
        if self
            .last_sweep
            .is_some_and(|last| now.saturating_duration_since(last) < self.window)
        {
            return;
        }
        let window = self.window;
        self.records
            .retain(|_, r| now.saturating_duration_since(r.last_failure) <= window);
        self.last_sweep = Some(now);
    }

    /// Number of usernames with a recorded failure.
    pub fn tracked(&self) -> usize {
        self.records.len()
    }

    /// Forget all failures for `username`.
    pub fn record_success(&mut self, username: &str) {
        self.records.remove(username);
    }

    /// Number of failures currently counted against `username`.
    pub fn failures(&self, username: &str) -> u32 {
        self.records.get(username).map_or(0, |r| r.count)
    }
}
