//! Error types for the ledger

use std::path::PathBuf;

use thiserror::Error;

/// Ledger error types
///
/// Only persistence can fail. Empty-collection operations on the ledger
/// return `None` or a [`SortOutcome`](crate::SortOutcome) instead.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Snapshot file does not exist
    #[error("snapshot not found: {}", path.display())]
    NotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O failed for {}: {source}", path.display())]
    Io {
        /// File being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A failure-counter line carried a count that is not a decimal `u32`
    #[error("malformed failure count {value:?} on line {line}")]
    MalformedCount {
        /// 1-based line number in the snapshot
        line: usize,
        /// Raw field text
        value: String,
    },
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

impl LedgerError {
    /// Wrap an I/O error, mapping `NotFound` to [`LedgerError::NotFound`]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// True when the error only means there is no snapshot yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
