// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, known log levels, and Argon2id cost floors.

use crate::diagnostic::ConfigError;
use crate::model::AguaConfig;

/// Lowest accepted Argon2id memory cost in KiB.
pub const MIN_ARGON2_MEMORY_COST: u32 = 8192;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AguaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level `{}` must be one of: {}",
                config.app.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.security.argon2_memory_cost < MIN_ARGON2_MEMORY_COST {
        errors.push(ConfigError::Validation {
            message: format!(
                "security.argon2_memory_cost must be at least {MIN_ARGON2_MEMORY_COST} (8 MiB), got {}",
                config.security.argon2_memory_cost
            ),
        });
    }

    if config.security.argon2_iterations < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "security.argon2_iterations must be at least 1, got {}",
                config.security.argon2_iterations
            ),
        });
    }

    if config.security.argon2_parallelism < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "security.argon2_parallelism must be at least 1, got {}",
                config.security.argon2_parallelism
            ),
        });
    }

    if config.security.max_failed_logins > 0 && config.security.lockout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "security.lockout_secs must be positive when max_failed_logins is set"
                .to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
