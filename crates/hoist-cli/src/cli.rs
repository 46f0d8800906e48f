//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use hoist_core::{Environment, ListStatus, ObjectKind, RunMode};

/// hoist - promote tables, functions and procedures along the environment chain
#[derive(Parser, Debug)]
#[command(name = "hoist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Dry-run switch: a number >= 1 logs the work without applying it
    #[arg(long, global = true, env = "EXPERIMENTAL")]
    pub experimental: Option<String>,
}

impl GlobalArgs {
    pub fn run_mode(&self) -> RunMode {
        RunMode::from_flag(self.experimental.as_deref())
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Promote one work list into a destination environment
    Migrate(MigrateArgs),

    /// Show the non-empty work lists feeding a destination
    Pending(PendingArgs),
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Object kind: tables, functions or procedures
    #[arg(short, long)]
    pub kind: ObjectKind,

    /// Work list status: new, updated or deprecated
    #[arg(short, long, default_value = "new")]
    pub status: ListStatus,

    /// Destination environment: UAT, STAGE or PROD
    #[arg(short, long)]
    pub env: Environment,
}

/// Arguments for the pending command
#[derive(Args, Debug)]
pub struct PendingArgs {
    /// Destination environment: UAT, STAGE or PROD; every configured
    /// destination when omitted
    #[arg(short, long)]
    pub env: Option<Environment>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
