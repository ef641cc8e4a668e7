//! # Loginwatch Terminal - Analyst Front End
//!
//! **Purpose**: Drive a [`loginwatch_ledger::Ledger`] from an interactive menu
//! or from one-shot subcommands, persisting it to a snapshot file between runs.
//!
//! # Architecture Constraints
//!
//! - `cli` - argument parsing only (clap definitions)
//! - `handlers` - menu loop and command logic, generic over I/O
//! - `config` - TOML configuration and its resolution order
//! - `logging` - tracing subscriber setup, stderr only
//!
//! Menu and command output goes to the writer the handler is given; log
//! records never do.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;

pub use cli::{Cli, Commands};
pub use config::TerminalConfig;
pub use error::{Result, TerminalError};
pub use handlers::{handle_command, MenuAction, Shell, StartupLoad};
