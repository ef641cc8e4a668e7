//! # Command Handlers
//!
//! Implementation logic behind [`crate::cli`]. Handlers drive the ledger and
//! print results; they hold no state of their own beyond what they are given.
//!
//! - `shell` - interactive menu loop
//! - `commands` - one-shot subcommands that load, act and save

pub mod commands;
pub mod shell;

pub use commands::handle_command;
pub use shell::{startup_ledger, MenuAction, Shell, StartupLoad};

/// Timestamp format used when none is supplied
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Local time now, in [`TIMESTAMP_FORMAT`]
pub fn default_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}
