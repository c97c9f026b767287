// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `agua doctor` command implementation.
//!
//! Runs diagnostic checks against the configuration and the database.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use agua_config::AguaConfig;
use agua_core::{AguaError, CredentialStore, HealthStatus, PluginAdapter};
use agua_storage::SqliteStore;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `agua doctor` command. With `plain`, disables colored output.
pub async fn run_doctor(
    config: &AguaConfig,
    config_path: Option<&Path>,
    plain: bool,
) -> Result<(), AguaError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = collect_checks(config, config_path).await;

    println!();
    println!("  agua doctor");
    println!("  {}", "-".repeat(50));

    for result in &results {
        println!("{}", format_result(result, use_color));
    }
    println!();

    let issues = results
        .iter()
        .filter(|r| r.status != CheckStatus::Pass)
        .count();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

async fn collect_checks(config: &AguaConfig, config_path: Option<&Path>) -> Vec<CheckResult> {
    let mut results = vec![check_config(config_path)];
    results.push(check_dev_seeding(config));

    let start = Instant::now();
    let store = match SqliteStore::open(config.storage.clone()).await {
        Ok(store) => store,
        Err(e) => {
            results.push(CheckResult::new(
                "Database",
                CheckStatus::Fail,
                format!("open failed: {e}"),
                start,
            ));
            return results;
        }
    };
    results.push(check_database(&store, start).await);
    results.push(check_users(&store).await);
    results.push(check_db_integrity(&store).await);
    let _ = store.shutdown().await;
    results
}

fn format_result(result: &CheckResult, use_color: bool) -> String {
    use colored::Colorize;

    let duration_ms = result.duration.as_millis();
    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        );
    }
    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), result.message.normal()),
        CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
        CheckStatus::Fail => ("✗".red(), result.message.red()),
    };
    format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
}

/// Check configuration loads without errors.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let loaded = match config_path {
        Some(path) => agua_config::load_and_validate_path(path),
        None => agua_config::load_and_validate(),
    };
    match loaded {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// Warn when the fixed development accounts are enabled.
fn check_dev_seeding(config: &AguaConfig) -> CheckResult {
    let start = Instant::now();
    if config.seed.dev_accounts {
        CheckResult::new(
            "Dev accounts",
            CheckStatus::Warn,
            "seed.dev_accounts is on (admin/a, user/u)",
            start,
        )
    } else {
        CheckResult::new("Dev accounts", CheckStatus::Pass, "disabled", start)
    }
}

async fn check_database(store: &SqliteStore, start: Instant) -> CheckResult {
    match store.health_check().await {
        Ok(HealthStatus::Healthy) => CheckResult::new(
            "Database",
            CheckStatus::Pass,
            format!(
                "{} {} connected ({})",
                store.name(),
                store.version(),
                store.database_path()
            ),
            start,
        ),
        Ok(HealthStatus::Degraded(msg)) => CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("{} {}: {msg}", store.name(), store.version()),
            start,
        ),
        Ok(HealthStatus::Unhealthy(msg)) => {
            CheckResult::new("Database", CheckStatus::Fail, msg, start)
        }
        Err(e) => CheckResult::new(
            "Database",
            CheckStatus::Fail,
            format!("query failed: {e}"),
            start,
        ),
    }
}

async fn check_users(store: &SqliteStore) -> CheckResult {
    let start = Instant::now();
    match store.count_users().await {
        Ok(0) => CheckResult::new(
            "Accounts",
            CheckStatus::Warn,
            "no accounts; run `agua user add` or `agua seed --dev`",
            start,
        ),
        Ok(n) => CheckResult::new("Accounts", CheckStatus::Pass, format!("{n} registered"), start),
        Err(e) => CheckResult::new(
            "Accounts",
            CheckStatus::Fail,
            format!("count failed: {e}"),
            start,
        ),
    }
}

/// SQLite integrity check.
async fn check_db_integrity(store: &SqliteStore) -> CheckResult {
    let start = Instant::now();
    match store.integrity_check().await {
        Ok(rows) if rows.len() == 1 && rows[0] == "ok" => {
            CheckResult::new("DB integrity", CheckStatus::Pass, "ok", start)
        }
        Ok(rows) => CheckResult::new(
            "DB integrity",
            CheckStatus::Fail,
            format!("{} issue(s) found", rows.len()),
            start,
        ),
        Err(e) => CheckResult::new(
            "DB integrity",
            CheckStatus::Fail,
            format!("check failed: {e}"),
            start,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agua_config::model::StorageConfig;

    fn config_in(dir: &tempfile::TempDir) -> AguaConfig {
        AguaConfig {
            storage: StorageConfig {
                database_path: dir.path().join("doctor.db").to_string_lossy().into_owned(),
                ..StorageConfig::default()
            },
            ..AguaConfig::default()
        }
    }

    fn status_of<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckStatus {
        &results
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no check named {name}"))
            .status
    }

    #[test]
    fn check_result_has_required_fields() {
        let result = CheckResult::new("Test", CheckStatus::Pass, "ok", Instant::now());
        assert_eq!(result.name, "Test");
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "ok");
    }

    #[test]
    fn plain_output_uses_tags() {
        let result = CheckResult {
            name: "Accounts".into(),
            status: CheckStatus::Warn,
            message: "none".into(),
            duration: Duration::from_millis(3),
        };
        let line = format_result(&result, false);
        assert!(line.contains("[WARN]"));
        assert!(line.contains("Accounts"));
        assert!(line.ends_with("none (3ms)"));
    }

    #[test]
    fn config_check_fails_on_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agua.toml");
        std::fs::write(&path, "[storage]\ndatabse_path = \"x.db\"\n").unwrap();
        let result = check_config(Some(path.as_path()));
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn dev_seeding_warns_when_enabled() {
        let mut config = AguaConfig::default();
        assert_eq!(check_dev_seeding(&config).status, CheckStatus::Pass);
        config.seed.dev_accounts = true;
        assert_eq!(check_dev_seeding(&config).status, CheckStatus::Warn);
    }

    #[tokio::test]
    async fn empty_database_warns_about_accounts() {
        let dir = tempfile::tempdir().unwrap();
        let results = collect_checks(&config_in(&dir), None).await;
        assert_eq!(status_of(&results, "Database"), &CheckStatus::Pass);
        assert_eq!(status_of(&results, "Accounts"), &CheckStatus::Warn);
        assert_eq!(status_of(&results, "DB integrity"), &CheckStatus::Pass);
    }

    #[tokio::test]
    async fn database_check_names_the_backend() {
        let dir = tempfile::tempdir().unwrap();
        let results = collect_checks(&config_in(&dir), None).await;
        let database = results.iter().find(|r| r.name == "Database").unwrap();
        assert!(
            database.message.starts_with("sqlite 0.1.0 connected"),
            "got: {}",
            database.message
        );
    }

    #[tokio::test]
    async fn in_memory_database_warns_about_journal_mode() {
        let mut config = AguaConfig::default();
        config.storage.database_path = ":memory:".to_string();
        let results = collect_checks(&config, None).await;
        assert_eq!(status_of(&results, "Database"), &CheckStatus::Warn);
    }

    #[tokio::test]
    async fn unopenable_database_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut config = config_in(&dir);
        config.storage.database_path = blocker.join("x.db").to_string_lossy().into_owned();
        let results = collect_checks(&config, None).await;
        assert_eq!(status_of(&results, "Database"), &CheckStatus::Fail);
    }
}
