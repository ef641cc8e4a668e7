//! One-shot command handlers
//!
//! Each command loads the data file (missing means an empty ledger), acts,
//! and saves only when it changed something. Unlike the shell, a snapshot
//! that exists but cannot be read is an error here.

use std::io::{BufRead, Write};

use loginwatch_ledger::snapshot::{load_from_path, save_to_path};
use loginwatch_ledger::{Ledger, SortOutcome};
use tracing::{debug, warn};

use super::default_timestamp;
use super::shell::Shell;
use crate::cli::Commands;
use crate::config::TerminalConfig;
use crate::error::Result;

/// Run `command` against the configured data file
///
/// `input` is only read by [`Commands::Shell`].
pub fn handle_command<R: BufRead, W: Write>(
    command: &Commands,
    config: &TerminalConfig,
    input: R,
    mut out: W,
) -> Result<()> {
    match command {
        Commands::Shell => {
            let mut shell = Shell::start(config.clone(), input, out)?;
            shell.run()
        }
        Commands::Status => {
            let ledger = load_existing(config)?;
            writeln!(out, "{}", ledger.summary())?;
            Ok(())
        }
        Commands::Record {
            user,
            ip,
            timestamp,
            failed,
        } => {
            let mut ledger = load_existing(config)?;
            let timestamp = timestamp
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map_or_else(default_timestamp, str::to_string);
            let success = !failed;
            let raised = ledger.record_attempt(user.as_str(), ip.as_str(), timestamp, success);
            if let Some(alert) = raised {
                let suspect = alert.ip_address();
                writeln!(out, "** ALERT GENERATED ** Suspicious IP: {suspect}")?;
            }
            save(&ledger, config)?;
            writeln!(out, "Login recorded successfully.")?;
            Ok(())
        }
        Commands::Logs { sorted } => {
            let mut ledger = load_existing(config)?;
            if *sorted {
                match ledger.sort_by_username() {
                    SortOutcome::Sorted => save(&ledger, config)?,
                    SortOutcome::NotEnoughEntries => debug!("Not enough logs to sort"),
                }
            }
            if ledger.events().is_empty() {
                writeln!(out, "No login attempts recorded.")?;
            }
            for attempt in ledger.events() {
                writeln!(out, "{attempt}")?;
            }
            Ok(())
        }
        Commands::Alerts => {
            let ledger = load_existing(config)?;
            if ledger.pending_alerts().next().is_none() {
                writeln!(out, "No pending alerts.")?;
                return Ok(());
            }
            writeln!(out, "=== Pending Alerts ===")?;
            for alert in ledger.pending_alerts() {
                writeln!(out, "{alert}")?;
            }
            Ok(())
        }
        Commands::Dismiss => {
            let mut ledger = load_existing(config)?;
            let dismissed = ledger.dismiss_next().map(|a| a.ip_address().to_string());
            match dismissed {
                Some(ip) => {
                    save(&ledger, config)?;
                    writeln!(out, "Alert dismissed: {ip}")?;
                }
                None => writeln!(out, "No alerts to dismiss.")?,
            }
            Ok(())
        }
        Commands::Undo => {
            let mut ledger = load_existing(config)?;
            let restored = ledger
                .undo_last_dismissal()
                .map(|a| a.ip_address().to_string());
            match restored {
                Some(ip) => {
                    save(&ledger, config)?;
                    writeln!(out, "Undo complete. Alert restored: {ip}")?;
                }
                None => writeln!(out, "No dismissed alerts to restore.")?,
            }
            Ok(())
        }
        Commands::Config => {
            write!(out, "{}", config.to_toml_string()?)?;
            Ok(())
        }
    }
}

fn load_existing(config: &TerminalConfig) -> Result<Ledger> {
    match load_from_path(&config.data_file) {
        Ok(loaded) => {
            if !loaded.report.is_clean() {
                warn!(
                    path = %config.data_file.display(),
                    skipped = loaded.report.skipped.len(),
                    "Snapshot had malformed lines"
                );
            }
            Ok(loaded.ledger)
        }
        Err(e) if e.is_not_found() => {
            debug!(path = %config.data_file.display(), "No saved data, starting empty");
            Ok(Ledger::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn save(ledger: &Ledger, config: &TerminalConfig) -> Result<()> {
    save_to_path(ledger, &config.data_file)?;
    Ok(())
}
