// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide setup shared by the subcommands.

use std::sync::Arc;

use agua_auth::{Authenticator, seed_dev_accounts};
use agua_config::AguaConfig;
use agua_core::{AguaError, CredentialStore, EventStore, PluginAdapter};
use agua_session::App;
use agua_storage::SqliteStore;
use tracing::{info, warn};

/// Initialize the tracing subscriber with an env filter.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("agua={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

/// The opened store plus everything built on top of it.
pub struct Runtime {
    pub store: Arc<SqliteStore>,
    pub authenticator: Arc<Authenticator>,
    pub app: App,
}

impl Runtime {
    /// Open the database, build the authenticator and, when
    /// `seed.dev_accounts` is set, create the development accounts.
    pub async fn start(config: &AguaConfig) -> Result<Self, AguaError> {
        let store = Arc::new(SqliteStore::open(config.storage.clone()).await?);
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let authenticator = Arc::new(Authenticator::new(credentials, &config.security)?);

        if config.seed.dev_accounts {
            warn!("seed.dev_accounts is enabled; do not use this in production");
            let report =
                seed_dev_accounts(authenticator.store().as_ref(), authenticator.hasher()).await?;
            info!(
                created = report.created.len(),
                existing = report.existing.len(),
                "development accounts seeded"
            );
        }

        let events: Arc<dyn EventStore> = store.clone();
        let app = App::new(authenticator.clone(), events);
        Ok(Self {
            store,
            authenticator,
            app,
        })
    }

    /// Checkpoint and close the store.
    pub async fn shutdown(&self) -> Result<(), AguaError> {
        self.store.shutdown().await
    }
}
