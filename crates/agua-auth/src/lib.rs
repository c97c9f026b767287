// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication for the Agua session application.
//!
//! Passwords are hashed with Argon2id into PHC strings and verified in
//! constant time. The [`Authenticator`] never reveals whether a username
//! exists, and a per-username [`LoginThrottle`] locks out repeated guessing.

pub mod authenticator;
pub mod password;
pub mod prompt;
pub mod registration;
pub mod seed;
pub mod throttle;

pub use authenticator::Authenticator;
pub use password::PasswordHasher;
pub use prompt::{read_new_password, read_password};
pub use registration::register_user;
pub use seed::{DEV_ACCOUNTS, seed_dev_accounts};
pub use throttle::LoginThrottle;
