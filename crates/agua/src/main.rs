// SPDX-FileCopyrightText: 2026 Agua Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Agua - a role-gated session shell with a per-user calendar.
//!
//! This is the binary entry point.

mod admin;
mod doctor;
mod runtime;
mod shell;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use colored::Colorize;

use agua_config::AguaConfig;
use agua_core::Role;

/// Agua - a role-gated session shell with a per-user calendar.
#[derive(Parser, Debug)]
#[command(name = "agua", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive session shell.
    Shell,
    /// Create bootstrap accounts.
    Seed {
        /// Create the fixed development accounts (admin/a and user/u).
        #[arg(long)]
        dev: bool,
    },
    /// Manage user accounts.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Run diagnostic checks against the configuration and database.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// Register a new account. The password is read from the terminal
    /// or from AGUA_PASSWORD.
    Add {
        username: String,
        email: String,
        #[arg(long, default_value = "user", value_parser = parse_role)]
        role: Role,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(s).map_err(|_| format!("unknown role '{s}' (expected 'admin' or 'user')"))
}

fn load_config(path: Option<&PathBuf>) -> AguaConfig {
    let loaded = match path {
        Some(path) => agua_config::load_and_validate_path(path),
        None => agua_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            agua_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    runtime::init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Seed { dev }) => admin::run_seed(&config, dev).await,
        Some(Commands::User {
            action: UserCommands::Add {
                username,
                email,
                role,
            },
        }) => admin::run_user_add(&config, &username, &email, role).await,
        Some(Commands::Doctor { plain }) => {
            doctor::run_doctor(&config, cli.config.as_deref(), plain).await
        }
        None => {
            println!("agua: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
