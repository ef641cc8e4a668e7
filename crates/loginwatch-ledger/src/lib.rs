//! # Loginwatch Ledger - Security Event Domain Crate
//!
//! **Purpose**: Record login attempts, derive per-address failure counts, raise
//! alerts at a fixed threshold and keep them in a reviewable backlog.
//!
//! # Architecture Constraints
//!
//! - YES Pure, synchronous domain logic over owned values
//! - YES Line-oriented snapshot encoding of the full ledger state
//! - NO terminal I/O, prompts or menu text (that's `loginwatch-terminal`)
//! - NO global state: callers own the [`Ledger`] and pass it around explicitly
//!
//! ## Core Concepts
//!
//! - **Event log**: append-only sequence of [`LoginAttempt`]s
//! - **Failure counters**: failed attempts seen per IP address
//! - **Backlog**: FIFO queue of pending [`Alert`]s
//! - **Undo history**: LIFO [`DismissalStack`] of dismissed alerts
//! - **Snapshot**: `L`/`F`/`A`/`D` tagged text lines, see [`snapshot`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Reversible escaping of free text into delimiter-safe tokens
pub mod escape;

/// Ledger error types
pub mod errors;

/// The ledger store and its threshold rule
pub mod ledger;

/// Immutable login attempt and alert records
pub mod records;

/// Snapshot encoding and file persistence
pub mod snapshot;

pub use errors::{LedgerError, Result};
pub use ledger::{
    DismissalStack, Ledger, LedgerSummary, SortOutcome, ALERT_MESSAGE, FAILURE_THRESHOLD,
};
pub use records::{Alert, LoginAttempt};
pub use snapshot::{LoadReport, LoadedSnapshot, SkipReason, SkippedLine};
