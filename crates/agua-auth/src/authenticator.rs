// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Username/password verification against a [`CredentialStore`].

use std::sync::Arc;
use std::time::Instant;

use agua_config::model::SecurityConfig;
use agua_core::{AguaError, CredentialStore, Identity};
use secrecy::SecretString;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::password::PasswordHasher;
use crate::throttle::LoginThrottle;

/// Verifies credentials and yields the authenticated [`Identity`].
///
/// Every failure, whether an unknown user, a wrong password or a throttled
/// username, surfaces as the same [`AguaError::AuthFailure`]. An unknown
/// username still pays for one Argon2id verification against a dummy hash.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    dummy_hash: String,
    throttle: Mutex<LoginThrottle>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("store", &self.store.name())
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(store: Arc<dyn CredentialStore>, config: &SecurityConfig) -> Result<Self, AguaError> {
        let hasher = PasswordHasher::new(config)?;
        let dummy_hash = hasher.hash(&SecretString::from("agua-timing-equalizer".to_string()))?;
        Ok(Self {
            store,
            hasher,
            dummy_hash,
            throttle: Mutex::new(LoginThrottle::from_config(config)),
        })
    }

    /// The hasher new accounts should be created with.
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Verify `username`/`password`.
    ///
    /// Storage failures propagate unchanged; they are not credential errors.
    pub async fn verify(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Identity, AguaError> {
        if self.throttle.lock().await.is_locked(username, Instant::now()) {
            warn!(username, "login throttled");
            return Err(AguaError::AuthFailure);
        }

        let identity = match self.store.find_by_username(username).await {
            Ok(cred) => self
                .hasher
                .verify(password, &cred.password_hash)
                .then(|| cred.identity()),
            Err(AguaError::NotFound { .. }) => {
                let _ = self.hasher.verify(password, &self.dummy_hash);
                debug!(username, "unknown username");
                None
            }
            Err(e) => return Err(e),
        };

        let mut throttle = self.throttle.lock().await;
        match identity {
            Some(identity) => {
                throttle.record_success(username);
                info!(username, role = %identity.role, "login succeeded");
                Ok(identity)
            }
            None => {
                if throttle.record_failure(username, Instant::now()) {
                    warn!(username, "too many failed logins, locking username");
                } else {
                    warn!(username, "login failed");
                }
                Err(AguaError::AuthFailure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agua_config::model::StorageConfig;
    use agua_core::Role;
    use agua_storage::SqliteStore;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    use crate::registration::register_user;

    fn low_cost(max_failed_logins: u32) -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost: 8192,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            max_failed_logins,
            lockout_secs: 300,
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    async fn setup(max_failed_logins: u32) -> (Authenticator, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(StorageConfig {
            database_path: dir.path().join("auth.db").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        })
        .await
        .unwrap();
        let store: Arc<dyn CredentialStore> = Arc::new(store);
        let auth = Authenticator::new(store, &low_cost(max_failed_logins)).unwrap();
        register_user(
            auth.store().as_ref(),
            auth.hasher(),
            "admin",
            "admin@admin",
            &secret("a"),
            Role::Admin,
        )
        .await
        .unwrap();
        (auth, dir)
    }

    #[tokio::test]
    async fn correct_password_yields_identity() {
        let (auth, _dir) = setup(5).await;
        let identity = auth.verify("admin", &secret("a")).await.unwrap();
        assert_eq!(identity.role, Role::Admin);
        let stored = auth.store().find_by_username("admin").await.unwrap();
        assert_eq!(identity.user_id, stored.user_id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically() {
        let (auth, _dir) = setup(5).await;
        let wrong = auth.verify("admin", &secret("wrong")).await.unwrap_err();
        let unknown = auth.verify("nobody", &secret("x")).await.unwrap_err();
        assert!(matches!(wrong, AguaError::AuthFailure));
        assert!(matches!(unknown, AguaError::AuthFailure));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn lockout_blocks_even_the_correct_password() {
        let (auth, _dir) = setup(3).await;
        for _ in 0..3 {
            assert!(auth.verify("admin", &secret("nope")).await.is_err());
        }
        let err = auth.verify("admin", &secret("a")).await.unwrap_err();
        assert!(matches!(err, AguaError::AuthFailure));
    }

    #[tokio::test]
    async fn success_clears_earlier_failures() {
        let (auth, _dir) = setup(3).await;
        auth.verify("admin", &secret("nope")).await.unwrap_err();
        auth.verify("admin", &secret("nope")).await.unwrap_err();
        auth.verify("admin", &secret("a")).await.unwrap();
        auth.verify("admin", &secret("nope")).await.unwrap_err();
        auth.verify("admin", &secret("nope")).await.unwrap_err();
        assert!(auth.verify("admin", &secret("a")).await.is_ok());
    }

    #[tokio::test]
    async fn disabled_throttle_never_locks() {
        let (auth, _dir) = setup(0).await;
        for _ in 0..10 {
            auth.verify("admin", &secret("nope")).await.unwrap_err();
        }
        assert!(auth.verify("admin", &secret("a")).await.is_ok());
    }

    #[tokio::test]
    #[traced_test]
    async fn logs_name_the_user_but_never_the_password() {
        let (auth, _dir) = setup(1).await;
        auth.verify("admin", &secret("hunter2-secret")).await.unwrap_err();
        auth.verify("admin", &secret("hunter2-secret")).await.unwrap_err();
        assert!(logs_contain("locking username"));
        assert!(logs_contain("login throttled"));
        assert!(logs_contain("admin"));
        assert!(!logs_contain("hunter2-secret"));
    }
}
