// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Account creation: hash the password, then insert.

use agua_core::{AguaError, CredentialStore, NewUser, Role, UserId};
use secrecy::SecretString;
use tracing::info;

use crate::password::PasswordHasher;

/// Create a user with a freshly hashed password.
///
/// Empty usernames or emails are rejected before any hashing work is done.
/// A taken username or email fails with [`AguaError::DuplicateIdentity`].
pub async fn register_user(
    store: &dyn CredentialStore,
    hasher: &PasswordHasher,
    username: &str,
    email: &str,
    password: &SecretString,
    role: Role,
) -> Result<UserId, AguaError> {
    let mut user = NewUser {
        username: username.trim().to_string(),
        email: email.trim().to_string(),
        password_hash: String::new(),
        role,
    };
    user.validate()?;
    user.password_hash = hasher.hash(password)?;

    let id = store.create_user(&user).await?;
    info!(username = %user.username, role = %role, user_id = %id, "user created");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agua_config::model::{SecurityConfig, StorageConfig};
    use agua_storage::SqliteStore;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&SecurityConfig {
            argon2_memory_cost: 8192,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..SecurityConfig::default()
        })
        .unwrap()
    }

    async fn store(dir: &tempfile::TempDir) -> SqliteStore {
        SqliteStore::open(StorageConfig {
            database_path: dir.path().join("reg.db").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        })
        .await
        .unwrap()
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[tokio::test]
    async fn stores_hash_not_plaintext() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let hasher = hasher();
        register_user(&store, &hasher, "joana", "joana@agua", &secret("pw"), Role::User)
            .await
            .unwrap();

        let cred = store.find_by_username("joana").await.unwrap();
        assert_ne!(cred.password_hash, "pw");
        assert!(cred.password_hash.starts_with("$argon2id$"));
        assert!(hasher.verify(&secret("pw"), &cred.password_hash));
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let hasher = hasher();
        register_user(&store, &hasher, "joana", "joana@agua", &secret("pw"), Role::User)
            .await
            .unwrap();

        let by_name = register_user(&store, &hasher, "joana", "x@agua", &secret("pw"), Role::User)
            .await
            .unwrap_err();
        assert!(matches!(by_name, AguaError::DuplicateIdentity { ref field } if field == "username"));

        let by_email =
            register_user(&store, &hasher, "outra", "joana@agua", &secret("pw"), Role::Admin)
                .await
                .unwrap_err();
        assert!(matches!(by_email, AguaError::DuplicateIdentity { ref field } if field == "email"));
    }

    #[tokio::test]
    async fn blank_fields_are_invalid_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir).await;
        let hasher = hasher();
        let err = register_user(&store, &hasher, " ", "a@b", &secret("pw"), Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AguaError::InvalidIdentity(_)));
        let err = register_user(&store, &hasher, "ana", "", &secret("pw"), Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AguaError::InvalidIdentity(_)));
        assert_eq!(store.count_users().await.unwrap(), 0);
    }
}
