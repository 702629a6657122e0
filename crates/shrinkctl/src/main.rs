//! Shrink Control - terminal client for timed loss-prevention investigations
//!
//! Runs the four-step investigation wizard in a TUI and exports the result
//! as JSON.

mod commands;
mod logging;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "shrinkctl")]
#[command(about = "Shrink Control - 5-minute shorts/overs investigation wizard", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive investigation wizard (default)
    Investigate,

    /// List the pattern catalog used on the pattern recognition step
    Patterns,

    /// Re-score an exported investigation file
    Score {
        /// Path to an exported investigation JSON file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Investigate);

    // A stdout subscriber would tear the wizard's alternate screen, so only
    // the non-interactive commands get one.
    if !matches!(command, Commands::Investigate) {
        tracing_subscriber::fmt().with_max_level(Level::INFO).init();
    }

    match command {
        Commands::Investigate => commands::investigate().await,
        Commands::Patterns => commands::patterns(),
        Commands::Score { file } => commands::score(&file),
    }
}
