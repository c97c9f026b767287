// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Development account seeding.

use agua_core::{AguaError, CredentialStore, NewUser, Role, SeedReport};
use secrecy::SecretString;
use tracing::info;

use crate::password::PasswordHasher;

/// A fixed development identity.
#[derive(Debug, Clone, Copy)]
pub struct DevAccount {
    pub username: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

/// The two accounts created by development seeding.
pub const DEV_ACCOUNTS: [DevAccount; 2] = [
    DevAccount {
        username: "admin",
        email: "admin@admin",
        password: "a",
        role: Role::Admin,
    },
    DevAccount {
        username: "user",
        email: "user@user",
        password: "u",
        role: Role::User,
    },
];

/// Ensure both development accounts exist.
///
/// Idempotent: accounts already present are reported in
/// [`SeedReport::existing`] and left unchanged. Both inserts share one
/// transaction.
pub async fn seed_dev_accounts(
    store: &dyn CredentialStore,
    hasher: &PasswordHasher,
) -> Result<SeedReport, AguaError> {
    let users = DEV_ACCOUNTS
        .iter()
        .map(|account| {
            Ok(NewUser {
                username: account.username.to_string(),
                email: account.email.to_string(),
                password_hash: hasher.hash(&SecretString::from(account.password.to_string()))?,
                role: account.role,
            })
        })
        .collect::<Result<Vec<_>, AguaError>>()?;

    let report = store.insert_missing_users(&users).await?;
    info!(
        created = ?report.created,
        existing = ?report.existing,
        "development accounts seeded"
    );
    Ok(report)
}
