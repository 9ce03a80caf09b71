//! Warden CLI
//!
//! Command-line interface for checking execution logs against the Warden
//! grammar, either from a local file or straight from the monitored URL.

mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};

#[derive(Parser)]
#[command(name = "warden")]
#[command(about = "Warden execution log checker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    handle_command(cli.command).await
}
