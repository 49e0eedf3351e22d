//! Command-line interface for crossline.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Crossline - tic-tac-toe session server
#[derive(Parser, Debug)]
#[command(name = "crossline")]
#[command(about = "Tic-tac-toe sessions over REST", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to, overrides the config file
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to, overrides the config file
        #[arg(short, long)]
        port: Option<u16>,
    },
}
