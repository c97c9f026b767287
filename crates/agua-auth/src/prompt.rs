// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or the `AGUA_PASSWORD` environment variable.

use agua_core::AguaError;
use secrecy::SecretString;

/// Environment variable consulted before prompting.
pub const PASSWORD_ENV_VAR: &str = "AGUA_PASSWORD";

/// Read a password for login.
///
/// Priority:
/// 1. `AGUA_PASSWORD` (for scripted use)
/// 2. Interactive TTY prompt via `rpassword`
pub fn read_password(prompt: &str) -> Result<SecretString, AguaError> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return prompt_once(prompt);
    }
    Err(no_password_source())
}

/// Read a new password, prompting twice when interactive.
pub fn read_new_password() -> Result<SecretString, AguaError> {
    if let Some(password) = password_from_env() {
        return Ok(password);
    }
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        let first = rpassword::prompt_password("New password: ").map_err(read_err)?;
        let second = rpassword::prompt_password("Confirm password: ").map_err(read_err)?;
        if first != second {
            return Err(AguaError::InvalidIdentity("passwords do not match".to_string()));
        }
        if first.is_empty() {
            return Err(AguaError::InvalidIdentity("empty password not allowed".to_string()));
        }
        return Ok(SecretString::from(first));
    }
    Err(no_password_source())
}

fn prompt_once(prompt: &str) -> Result<SecretString, AguaError> {
    let password = rpassword::prompt_password(prompt).map_err(read_err)?;
    Ok(SecretString::from(password))
}

fn password_from_env() -> Option<SecretString> {
    std::env::var(PASSWORD_ENV_VAR)
        .ok()
        .filter(|p| !p.is_empty())
        .map(SecretString::from)
}

fn read_err(e: std::io::Error) -> AguaError {
    AguaError::Internal(format!("failed to read password: {e}"))
}

fn no_password_source() -> AguaError {
    AguaError::Internal(format!(
        "no password provided; set {PASSWORD_ENV_VAR} or run interactively"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn password_from_env_var() {
        // SAFETY: env mutation is serialized across this module's tests.
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "from-env") };
        let result = read_password("Password: ");
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "from-env");
    }

    #[test]
    #[serial]
    fn new_password_from_env_var_skips_confirmation() {
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "from-env") };
        let result = read_new_password();
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };

        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn empty_env_var_is_ignored() {
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "") };
        let from_env = password_from_env();
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };

        assert!(from_env.is_none());
    }
}
