//! CLI routing and command dispatch.

use crate::constants;
use crate::core::config;
use crate::core::hasher::PasswordHasher;
use crate::core::paths::StorePaths;
use crate::core::users::{Outcome, UserStore};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod user;

/// Shared context passed to all command handlers.
pub struct CliContext {
    pub users: UserStore,
    pub strict: bool,
}

impl CliContext {
    /// Print the message for an operation outcome. Rule violations print
    /// like successes, and exit non-zero only under `--strict`.
    pub fn report(&self, outcome: Outcome, message: &str) {
        println!("{}", message);
        if !outcome.is_applied() && self.strict {
            std::process::exit(constants::EXIT_RULE_VIOLATION);
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "htpasswd-manager", version, about = "Manage users in an htpasswd file")]
pub struct Cli {
    /// Credential file (default: user.htpasswd in the working directory)
    #[arg(long, short = 'f', global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Exit with a non-zero status when a user already exists or is missing
    #[arg(long, global = true)]
    pub strict: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = config::load(self.config.as_deref())?;
        let paths = StorePaths::resolve(self.file, &config);
        let hasher = PasswordHasher::new(config.hash.cost)?;
        tracing::debug!(store = %paths, cost = hasher.cost(), command = self.command.name(), "dispatching");

        let ctx = CliContext {
            users: UserStore::new(paths, hasher, config.lock.enabled),
            strict: self.strict,
        };

        match self.command {
            Commands::List(args) => user::run_list(&ctx, args),
            Commands::Add(args) => user::run_add(&ctx, args),
            Commands::Delete(args) => user::run_delete(&ctx, args),
            Commands::Editpass(args) => user::run_editpass(&ctx, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all users
    List(user::ListArgs),
    /// Add a user to the credential file
    Add(user::AddArgs),
    /// Delete a user from the credential file
    Delete(user::DeleteArgs),
    /// Change a user's password
    Editpass(user::EditpassArgs),
}

impl Commands {
    /// Command name for log output.
    pub fn name(&self) -> &str {
        match self {
            Commands::List(_) => "list",
            Commands::Add(_) => "add",
            Commands::Delete(_) => "delete",
            Commands::Editpass(_) => "editpass",
        }
    }
}
