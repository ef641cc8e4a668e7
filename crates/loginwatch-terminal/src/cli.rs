//! Command-line argument definitions
//!
//! Clap structures only; the work happens in [`crate::handlers`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Suspicious login detection terminal
#[derive(Debug, Parser)]
#[command(
    name = "loginwatch",
    version,
    about = "Suspicious login detection terminal"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overrides `data_file` from the config
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands; none means [`Commands::Shell`]
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Interactive menu
    Shell,

    /// Print the summary line
    Status,

    /// Record one login attempt
    Record {
        /// Username of the attempt
        user: String,

        /// Source IP address
        ip: String,

        /// Free-form timestamp, local time now when omitted
        #[arg(short, long)]
        timestamp: Option<String>,

        /// Record the attempt as failed
        #[arg(short, long)]
        failed: bool,
    },

    /// Print the event log
    Logs {
        /// Sort by username first and save the new order
        #[arg(short, long)]
        sorted: bool,
    },

    /// Print pending alerts
    Alerts,

    /// Dismiss the oldest pending alert
    Dismiss,

    /// Restore the most recently dismissed alert
    Undo,

    /// Print the effective configuration as TOML
    Config,
}
