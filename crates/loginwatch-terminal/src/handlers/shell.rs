//! Interactive menu shell
//!
//! Generic over its input and output so sessions can be scripted in tests.
//! End of input behaves like choosing Exit.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use loginwatch_ledger::snapshot::{load_from_path, save_to_path};
use loginwatch_ledger::{Ledger, LedgerError, LoadReport, LoadedSnapshot, SortOutcome};
use tracing::{debug, warn};

use super::default_timestamp;
use crate::config::TerminalConfig;
use crate::error::Result;

const BANNER: &str = "===== SUSPICIOUS LOGIN DETECTION SYSTEM =====";

const MENU: [&str; 9] = [
    "1. Add Login Attempt",
    "2. Display All Logs",
    "3. Sort Logs (by Username)",
    "4. View Pending Alerts",
    "5. Dismiss Next Alert",
    "6. Undo Alert Dismissal",
    "7. Save Data",
    "8. Load Data",
    "9. Exit",
];

/// One menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Record a login attempt
    AddAttempt,
    /// Print the event log
    DisplayLogs,
    /// Sort the event log by username
    SortLogs,
    /// Print pending alerts
    ViewAlerts,
    /// Dismiss the oldest pending alert
    Dismiss,
    /// Restore the most recently dismissed alert
    Undo,
    /// Save to a chosen file
    Save,
    /// Load from a chosen file
    Load,
    /// Leave the shell
    Exit,
}

impl MenuAction {
    /// Map a menu number to its action
    pub fn from_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::AddAttempt),
            2 => Some(Self::DisplayLogs),
            3 => Some(Self::SortLogs),
            4 => Some(Self::ViewAlerts),
            5 => Some(Self::Dismiss),
            6 => Some(Self::Undo),
            7 => Some(Self::Save),
            8 => Some(Self::Load),
            9 => Some(Self::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Outcome of loading the data file at start-up
#[derive(Debug)]
pub enum StartupLoad {
    /// The data file was decoded
    Loaded(LoadedSnapshot),
    /// Loading is disabled or there is no data file yet
    Fresh,
    /// A data file exists but could not be loaded
    Unreadable(LedgerError),
}

/// Load the configured data file for a fresh session
///
/// A missing file is expected on first run and is only logged at debug level.
pub fn startup_ledger(config: &TerminalConfig) -> StartupLoad {
    if !config.load_on_start {
        return StartupLoad::Fresh;
    }
    match load_from_path(&config.data_file) {
        Ok(loaded) => StartupLoad::Loaded(loaded),
        Err(e) if e.is_not_found() => {
            debug!(path = %config.data_file.display(), "No saved data, starting fresh");
            StartupLoad::Fresh
        }
        Err(e) => {
            warn!(error = %e, "Could not load saved data, starting fresh");
            StartupLoad::Unreadable(e)
        }
    }
}

/// Menu-driven session over a [`Ledger`]
pub struct Shell<R, W> {
    config: TerminalConfig,
    ledger: Ledger,
    input: R,
    output: W,
    /// The data file exists but did not load; exit must not overwrite it
    keep_data_file: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Create a shell over an existing ledger
    pub fn new(config: TerminalConfig, ledger: Ledger, input: R, output: W) -> Self {
        Self {
            config,
            ledger,
            input,
            output,
            keep_data_file: false,
        }
    }

    /// Create a shell, loading the configured data file when enabled
    ///
    /// A data file that exists but fails to load is left alone: the session
    /// starts empty and exit skips the autosave until the file is saved
    /// explicitly.
    pub fn start(config: TerminalConfig, input: R, output: W) -> Result<Self> {
        let loaded = startup_ledger(&config);
        let mut shell = Self::new(config, Ledger::new(), input, output);
        let path = shell.config.data_file.display().to_string();
        match loaded {
            StartupLoad::Loaded(LoadedSnapshot { ledger, report }) => {
                shell.ledger = ledger;
                writeln!(shell.output, "Loaded saved data from {path}")?;
                shell.report_skipped(&report)?;
            }
            StartupLoad::Fresh => {}
            StartupLoad::Unreadable(e) => {
                shell.keep_data_file = true;
                writeln!(shell.output, "Could not load saved data from {path}: {e}")?;
            }
        }
        Ok(shell)
    }

    /// Current ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Give back the ledger and the output sink
    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.output)
    }

    /// Run the menu loop until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{BANNER}")?;
            writeln!(self.output, "{}", self.ledger.summary())?;
            for line in MENU {
                writeln!(self.output, "{line}")?;
            }

            let Some(input) = self.prompt("Select option: ")? else {
                return self.exit();
            };
            if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
                writeln!(self.output, "Invalid input. Enter a number.")?;
                continue;
            }
            let choice = input.parse::<u32>().ok();
            let Some(action) = choice.and_then(MenuAction::from_choice) else {
                writeln!(self.output, "Invalid option.")?;
                continue;
            };

            if let Flow::Exit = self.dispatch(action)? {
                return self.exit();
            }
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<Flow> {
        match action {
            MenuAction::AddAttempt => return self.add_attempt(),
            MenuAction::DisplayLogs => self.display_logs()?,
            MenuAction::SortLogs => {
                let message = match self.ledger.sort_by_username() {
                    SortOutcome::Sorted => "Logs sorted by username.",
                    SortOutcome::NotEnoughEntries => "Not enough logs to sort.",
                };
                writeln!(self.output, "{message}")?;
            }
            MenuAction::ViewAlerts => self.view_alerts()?,
            MenuAction::Dismiss => match self.ledger.dismiss_next() {
                Some(alert) => writeln!(self.output, "Alert dismissed: {}", alert.ip_address())?,
                None => writeln!(self.output, "No alerts to dismiss.")?,
            },
            MenuAction::Undo => match self.ledger.undo_last_dismissal() {
                Some(alert) => writeln!(
                    self.output,
                    "Undo complete. Alert restored: {}",
                    alert.ip_address()
                )?,
                None => writeln!(self.output, "No dismissed alerts to restore.")?,
            },
            MenuAction::Save => {
                let Some(path) = self.prompt_path("Save")? else {
                    return Ok(Flow::Exit);
                };
                match save_to_path(&self.ledger, &path) {
                    Ok(()) => {
                        if path == self.config.data_file {
                            self.keep_data_file = false;
                        }
                        writeln!(self.output, "Saved to {}", path.display())?;
                    }
                    Err(e) => writeln!(self.output, "Error saving file: {e}")?,
                }
            }
            MenuAction::Load => {
                let Some(path) = self.prompt_path("Load")? else {
                    return Ok(Flow::Exit);
                };
                match load_from_path(&path) {
                    Ok(LoadedSnapshot { ledger, report }) => {
                        self.ledger = ledger;
                        writeln!(self.output, "Loaded from {}", path.display())?;
                        self.report_skipped(&report)?;
                    }
                    Err(e) => writeln!(self.output, "Error loading file: {e}")?,
                }
            }
            MenuAction::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    fn add_attempt(&mut self) -> Result<Flow> {
        let Some(username) = self.prompt_trimmed("Enter username: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(ip) = self.prompt_trimmed("Enter IP address: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(timestamp) = self.prompt_trimmed("Timestamp (e.g., 2025-11-23 14:00): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(success) = self.prompt_trimmed("Success? (true/false): ")? else {
            return Ok(Flow::Exit);
        };

        let timestamp = if timestamp.is_empty() {
            default_timestamp()
        } else {
            timestamp
        };
        let success = success.eq_ignore_ascii_case("true");

        if let Some(alert) = self.ledger.record_attempt(username, ip, timestamp, success) {
            writeln!(
                self.output,
                "** ALERT GENERATED ** Suspicious IP: {}",
                alert.ip_address()
            )?;
        }
        writeln!(self.output, "Login recorded successfully.")?;
        Ok(Flow::Continue)
    }

    fn display_logs(&mut self) -> Result<()> {
        if self.ledger.events().is_empty() {
            writeln!(self.output, "No login attempts recorded.")?;
            return Ok(());
        }
        for attempt in self.ledger.events() {
            writeln!(self.output, "{attempt}")?;
        }
        Ok(())
    }

    fn view_alerts(&mut self) -> Result<()> {
        if self.ledger.pending_alerts().next().is_none() {
            writeln!(self.output, "No pending alerts.")?;
            return Ok(());
        }
        writeln!(self.output, "=== Pending Alerts ===")?;
        for alert in self.ledger.pending_alerts() {
            writeln!(self.output, "{alert}")?;
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        let path = self.config.data_file.clone();
        if self.config.autosave_on_exit && self.keep_data_file {
            let path = path.display();
            writeln!(self.output, "Not auto-saving over unreadable {path}")?;
        } else if self.config.autosave_on_exit {
            match save_to_path(&self.ledger, &path) {
                Ok(()) => writeln!(self.output, "Auto-saved to {}", path.display())?,
                Err(e) => warn!(error = %e, "Auto-save failed"),
            }
        }
        writeln!(self.output, "Exiting system...")?;
        self.output.flush()?;
        Ok(())
    }

    fn report_skipped(&mut self, report: &LoadReport) -> Result<()> {
        if !report.is_clean() {
            writeln!(
                self.output,
                "Skipped {} malformed line(s).",
                report.skipped.len()
            )?;
        }
        Ok(())
    }

    /// Filename prompt for save and load; blank selects the configured file
    fn prompt_path(&mut self, verb: &str) -> Result<Option<PathBuf>> {
        let default = self.config.data_file.display().to_string();
        let text = format!("{verb} filename (blank for default '{default}'): ");
        let answer = self.prompt_trimmed(&text)?;
        Ok(answer.map(|name| {
            if name.is_empty() {
                self.config.data_file.clone()
            } else {
                PathBuf::from(name)
            }
        }))
    }

    fn prompt_trimmed(&mut self, text: &str) -> Result<Option<String>> {
        Ok(self.prompt(text)?.map(|line| line.trim().to_string()))
    }

    /// Print `text` and read one line without its terminator; `None` at end of input
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
