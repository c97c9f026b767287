// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agua seed` and `agua user add` command implementations.

use agua_auth::{read_new_password, register_user, seed_dev_accounts};
use agua_config::AguaConfig;
use agua_core::{AguaError, Role, SeedReport, UserId};
use colored::Colorize;
use secrecy::SecretString;

use crate::runtime::Runtime;

/// Runs `agua seed`.
pub async fn run_seed(config: &AguaConfig, dev: bool) -> Result<(), AguaError> {
    if !dev {
        println!("nothing to seed; pass --dev to create the development accounts");
        return Ok(());
    }
    let runtime = Runtime::start(config).await?;
    let report = seed(&runtime).await?;
    runtime.shutdown().await?;

    for username in &report.created {
        println!("  {} {username}", "created".green());
    }
    for username in &report.existing {
        println!("  {} {username}", "exists ".dimmed());
    }
    println!(
        "{}",
        "development accounts are for local use only".yellow()
    );
    Ok(())
}

/// Runs `agua user add`.
pub async fn run_user_add(
    config: &AguaConfig,
    username: &str,
    email: &str,
    role: Role,
) -> Result<(), AguaError> {
    let password = read_new_password()?;
    let runtime = Runtime::start(config).await?;
    let result = add_user(&runtime, username, email, &password, role).await;
    runtime.shutdown().await?;

    let id = result?;
    println!("{} {username} ({role}, id {id})", "created".green());
    Ok(())
}

async fn seed(runtime: &Runtime) -> Result<SeedReport, AguaError> {
    let auth = &runtime.authenticator;
    seed_dev_accounts(auth.store().as_ref(), auth.hasher()).await
}

async fn add_user(
    runtime: &Runtime,
    username: &str,
    email: &str,
    password: &SecretString,
    role: Role,
) -> Result<UserId, AguaError> {
    let auth = &runtime.authenticator;
    register_user(auth.store().as_ref(), auth.hasher(), username, email, password, role).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use agua_config::model::{SecurityConfig, StorageConfig};
    use agua_core::CredentialStore;
    use serial_test::serial;

    fn config(dir: &tempfile::TempDir) -> AguaConfig {
        AguaConfig {
            storage: StorageConfig {
                database_path: dir.path().join("admin.db").to_string_lossy().into_owned(),
                ..StorageConfig::default()
            },
            security: SecurityConfig {
                argon2_memory_cost: 8192,
                argon2_iterations: 1,
                argon2_parallelism: 1,
                ..SecurityConfig::default()
            },
            ..AguaConfig::default()
        }
    }

    #[tokio::test]
    async fn seed_reports_created_then_existing() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = Runtime::start(&config(&dir)).await.unwrap();

        let first = seed(&runtime).await.unwrap();
        assert_eq!(first.created, vec!["admin", "user"]);
        let second = seed(&runtime).await.unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.existing.len(), 2);
    }

    #[tokio::test]
    async fn add_user_then_login() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = Runtime::start(&config(&dir)).await.unwrap();
        let password = SecretString::from("hunter2".to_string());

        let id = add_user(&runtime, "rita", "rita@agua", &password, Role::Admin)
            .await
            .unwrap();
        let identity = runtime.authenticator.verify("rita", &password).await.unwrap();
        assert_eq!(identity.user_id, id);
        assert_eq!(identity.role, Role::Admin);

        let err = add_user(&runtime, "rita", "other@agua", &password, Role::User)
            .await
            .unwrap_err();
        assert!(matches!(err, AguaError::DuplicateIdentity { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn run_user_add_reads_password_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        // SAFETY: serialized with the other env-mutating tests.
        unsafe { std::env::set_var(agua_auth::prompt::PASSWORD_ENV_VAR, "from-env") };
        let loaded = agua_config::load_and_validate_path(&dir.path().join("absent.toml"));
        let result = run_user_add(&cfg, "env-user", "env@agua", Role::User).await;
        unsafe { std::env::remove_var(agua_auth::prompt::PASSWORD_ENV_VAR) };
        assert!(loaded.is_ok(), "config load must ignore the password variable");
        result.unwrap();

        let runtime = Runtime::start(&cfg).await.unwrap();
        assert_eq!(runtime.store.count_users().await.unwrap(), 1);
        runtime
            .authenticator
            .verify("env-user", &SecretString::from("from-env".to_string()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn run_seed_without_dev_flag_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(&dir);
        run_seed(&cfg, false).await.unwrap();
        assert!(!dir.path().join("admin.db").exists());
    }
}
