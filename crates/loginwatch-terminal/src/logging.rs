//! Tracing subscriber setup
//!
//! Logs go to stderr so they never interleave with menu output on stdout.

use tracing_subscriber::EnvFilter;

use crate::error::{Result, TerminalError};

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `level` is used as the filter.
pub fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| {
            let message = format!("invalid log level {level:?}: {e}");
            TerminalError::Config(message)
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| {
            let message = format!("failed to install tracing subscriber: {e}");
            TerminalError::Config(message)
        })
}
