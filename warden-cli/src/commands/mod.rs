//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod check;
mod fetch;

use anyhow::Result;
use clap::Subcommand;
use std::path::PathBuf;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate a log stored in a local file
    Check {
        /// Path to the log file, or `-` for stdin
        path: PathBuf,

        /// Print the parsed fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch the log over HTTP and validate it
    Fetch {
        /// URL of the log
        #[arg(
            long,
            env = "WARDEN_SOURCE_URL",
            default_value = "http://localhost:8000/execution.log"
        )]
        url: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Print the parsed fields as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Check { path, json } => check::handle_check(&path, json),
        Commands::Fetch { url, timeout, json } => fetch::handle_fetch(&url, timeout, json).await,
    }
}
