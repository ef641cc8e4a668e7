//! Terminal error types

use loginwatch_ledger::LedgerError;
use thiserror::Error;

/// Errors surfaced by the terminal front end
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Configuration could not be read, parsed or applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ledger persistence failed
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Reading input or writing output failed
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for terminal operations
pub type Result<T> = std::result::Result<T, TerminalError>;
