// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full stack on a temp SQLite database: store,
//! authenticator (with a cheap Argon2id profile), optional development
//! accounts and an [`App`]. Drive it with ordinary [`Session`] values.

use std::sync::Arc;

use agua_auth::{Authenticator, register_user, seed_dev_accounts};
use agua_config::model::{AguaConfig, SecurityConfig, StorageConfig};
use agua_core::{AguaError, CredentialStore, EventStore, Role, UserId};
use agua_session::{App, LoginForm, Screen, Session};
use agua_storage::SqliteStore;
use secrecy::SecretString;

use crate::failing_store::FlakyEventStore;

struct ExtraUser {
    username: String,
    email: String,
    password: String,
    role: Role,
}

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    dev_accounts: bool,
    max_failed_logins: u32,
    lockout_secs: u64,
    users: Vec<ExtraUser>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            dev_accounts: true,
            max_failed_logins: SecurityConfig::default().max_failed_logins,
            lockout_secs: SecurityConfig::default().lockout_secs,
            users: Vec::new(),
        }
    }

    /// Seed `admin`/`a` and `user`/`u` (on by default).
    pub fn with_dev_accounts(mut self, enabled: bool) -> Self {
        self.dev_accounts = enabled;
        self
    }

    /// Configure the login throttle. `0` disables it.
    pub fn with_throttle(mut self, max_failed_logins: u32, lockout_secs: u64) -> Self {
        self.max_failed_logins = max_failed_logins;
        self.lockout_secs = lockout_secs;
        self
    }

    /// Register an additional account at build time.
    pub fn with_user(mut self, username: &str, email: &str, password: &str, role: Role) -> Self {
        self.users.push(ExtraUser {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
        self
    }

    /// Build the test harness, creating all required subsystems.
    pub async fn build(self) -> Result<TestHarness, AguaError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| AguaError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let config = AguaConfig {
            storage: StorageConfig {
                database_path: db_path.to_string_lossy().into_owned(),
                ..StorageConfig::default()
            },
            security: SecurityConfig {
                argon2_memory_cost: 8192,
                argon2_iterations: 1,
                argon2_parallelism: 1,
                max_failed_logins: self.max_failed_logins,
                lockout_secs: self.lockout_secs,
            },
            ..AguaConfig::default()
        };

        let store = Arc::new(SqliteStore::open(config.storage.clone()).await?);
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let authenticator = Arc::new(Authenticator::new(credentials, &config.security)?);

        if self.dev_accounts {
            seed_dev_accounts(authenticator.store().as_ref(), authenticator.hasher()).await?;
        }
        for user in &self.users {
            register_user(
                authenticator.store().as_ref(),
                authenticator.hasher(),
                &user.username,
                &user.email,
                &SecretString::from(user.password.clone()),
                user.role,
            )
            .await?;
        }

        let events = Arc::new(FlakyEventStore::new(store.clone() as Arc<dyn EventStore>));
        let app = App::new(authenticator, events.clone());

        Ok(TestHarness {
            app,
            store,
            events,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment on a temp database.
pub struct TestHarness {
    /// The application under test.
    pub app: App,
    /// Direct handle on the backing store for assertions.
    pub store: Arc<SqliteStore>,
    /// The event store the app writes through; can simulate outages.
    pub events: Arc<FlakyEventStore>,
    /// Effective configuration.
    pub config: AguaConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A fresh unauthenticated session.
    pub fn session(&self) -> Session {
        Session::new()
    }

    /// Submit the login form for `session`.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<Screen, AguaError> {
        let form = LoginForm::new(username, SecretString::from(password.to_string()));
        self.app.login(session, form).await
    }

    /// Store id of `username`.
    pub async fn user_id(&self, username: &str) -> Result<UserId, AguaError> {
        Ok(self.store.find_by_username(username).await?.user_id)
    }
}
