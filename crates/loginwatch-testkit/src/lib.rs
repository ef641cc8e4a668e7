//! Loginwatch Testing Infrastructure
//!
//! Shared fixtures and proptest strategies for ledger and terminal tests.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! loginwatch-testkit = { path = "../loginwatch-testkit" }
//! ```
//!
//! ```rust,no_run
//! use loginwatch_testkit::fixtures::ledger_with_every_record_kind;
//!
//! let ledger = ledger_with_every_record_kind();
//! assert!(ledger.has_data());
//! ```

pub mod fixtures;
pub mod strategies;

pub use fixtures::*;
