// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id password hashing into PHC strings.
//!
//! Every hash gets a fresh 16-byte salt from the system RNG. The work factor
//! comes from [`SecurityConfig`] and is embedded in the PHC string, so hashes
//! made under an older configuration keep verifying.

use agua_config::model::SecurityConfig;
use agua_core::AguaError;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use ring::rand::{SecureRandom, SystemRandom};
use secrecy::{ExposeSecret, SecretString};

/// Hashes and verifies passwords with a fixed Argon2id work factor.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl PasswordHasher {
    /// Build a hasher from the configured work factor.
    pub fn new(config: &SecurityConfig) -> Result<Self, AguaError> {
        let params = Params::new(
            config.argon2_memory_cost,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AguaError::Config(format!("invalid Argon2id parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `password` under a fresh random salt, returning a PHC string.
    pub fn hash(&self, password: &SecretString) -> Result<String, AguaError> {
        let salt = generate_salt()?;
        let salt = SaltString::encode_b64(&salt)
            .map_err(|e| AguaError::Internal(format!("failed to encode salt: {e}")))?;
        let hash = self
            .argon2()
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| AguaError::Internal(format!("Argon2id hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Check `password` against a stored PHC string in constant time.
    ///
    /// A malformed stored hash verifies as `false` rather than erroring, so a
    /// corrupt row looks like a wrong password to the caller.
    pub fn verify(&self, password: &SecretString, phc: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(phc) else {
            return false;
        };
        self.argon2()
            .verify_password(password.expose_secret().as_bytes(), &parsed)
            .is_ok()
    }
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; 16], AguaError> {
    let rng = SystemRandom::new();
    let mut salt = [0u8; 16];
    rng.fill(&mut salt)
        .map_err(|_| AguaError::Internal("failed to generate random salt".to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_cost() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost: 8192,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..SecurityConfig::default()
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    #[test]
    fn hash_is_phc_argon2id() {
        let hasher = PasswordHasher::new(&low_cost()).unwrap();
        let hash = hasher.hash(&secret("a")).unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=8192,t=1,p=1$"), "got: {hash}");
    }

    #[test]
    fn verify_accepts_correct_password_only() {
        let hasher = PasswordHasher::new(&low_cost()).unwrap();
        let hash = hasher.hash(&secret("correct horse")).unwrap();
        assert!(hasher.verify(&secret("correct horse"), &hash));
        assert!(!hasher.verify(&secret("correct horsf"), &hash));
        assert!(!hasher.verify(&secret(""), &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = PasswordHasher::new(&low_cost()).unwrap();
        let h1 = hasher.hash(&secret("u")).unwrap();
        let h2 = hasher.hash(&secret("u")).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn hashes_from_older_work_factor_still_verify() {
        let old = PasswordHasher::new(&low_cost()).unwrap();
        let hash = old.hash(&secret("legacy")).unwrap();

        let newer = PasswordHasher::new(&SecurityConfig {
            argon2_memory_cost: 9216,
            argon2_iterations: 2,
            ..low_cost()
        })
        .unwrap();
        assert!(newer.verify(&secret("legacy"), &hash));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let hasher = PasswordHasher::new(&low_cost()).unwrap();
        assert!(!hasher.verify(&secret("a"), "not-a-phc-string"));
        assert!(!hasher.verify(&secret("a"), ""));
    }

    #[test]
    fn invalid_params_are_a_config_error() {
        let err = PasswordHasher::new(&SecurityConfig {
            argon2_parallelism: 0,
            ..low_cost()
        })
        .unwrap_err();
        assert!(matches!(err, AguaError::Config(_)));
    }

    #[test]
    fn debug_shows_work_factor_only() {
        let hasher = PasswordHasher::new(&low_cost()).unwrap();
        let debug = format!("{hasher:?}");
        assert!(debug.contains("m_cost: 8192"));
    }

    #[test]
    fn generate_salt_produces_random_values() {
        assert_ne!(generate_salt().unwrap(), generate_salt().unwrap());
    }
}
