// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store trait: user identities and password hashes.

use async_trait::async_trait;

use crate::error::AguaError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{NewUser, StoredCredential, UserId};

/// Outcome of a bulk insert that tolerates already-present identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Usernames inserted by this call.
    pub created: Vec<String>,
    /// Usernames skipped because the username or email already existed.
    pub existing: Vec<String>,
}

/// Persistence for user identities. Owns the uniqueness constraints on
/// username and email.
///
/// Implementations never see a plaintext password; callers hash first.
#[async_trait]
pub trait CredentialStore: PluginAdapter {
    /// Insert a user row.
    ///
    /// Fails with [`AguaError::DuplicateIdentity`] when the username or email
    /// is already taken, and [`AguaError::InvalidIdentity`] when either is
    /// empty.
    async fn create_user(&self, user: &NewUser) -> Result<UserId, AguaError>;

    /// Look up a user by username. Read-only.
    ///
    /// Returns [`AguaError::NotFound`] on a miss.
    async fn find_by_username(&self, username: &str) -> Result<StoredCredential, AguaError>;

    /// Insert every user in one transaction, skipping rows whose username or
    /// email already exists.
    async fn insert_missing_users(&self, users: &[NewUser]) -> Result<SeedReport, AguaError>;

    /// Number of stored users.
    async fn count_users(&self) -> Result<u64, AguaError>;
}
