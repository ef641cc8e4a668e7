//! Snapshot encoding of the full ledger state
//!
//! One record per line, fields joined with `|`, first field a tag:
//!
//! ```text
//! L|username|ip|timestamp|true      login attempt, log order
//! F|ip|count                        failure counter
//! A|ip|message|timestamp            pending alert, FIFO order
//! D|ip|message|timestamp            dismissed alert, bottom of stack first
//! ```
//!
//! Free-text fields go through [`escape`](crate::escape::escape). There is no
//! header or version marker and readers do not depend on tag grouping.
//!
//! Decoding always builds a fresh [`Ledger`]. Callers replace their own value
//! only once decoding succeeded, so a rejected snapshot leaves it untouched.

use std::collections::{HashMap, VecDeque};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::errors::{LedgerError, Result};
use crate::escape::{escape, join_fields, split_fields, unescape};
use crate::ledger::{DismissalStack, Ledger};
use crate::records::{Alert, LoginAttempt};

const TAG_LOGIN: &str = "L";
const TAG_FAILURES: &str = "F";
const TAG_PENDING: &str = "A";
const TAG_DISMISSED: &str = "D";

/// Why a line was skipped while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer fields than the tag requires
    Truncated {
        /// Tag of the line
        tag: String,
        /// Fields required, tag included
        expected: usize,
        /// Fields found
        found: usize,
    },
    /// Tag is not one of `L`, `F`, `A`, `D`
    UnknownTag(String),
}

/// A line ignored by the decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Non-fatal findings from decoding a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Lines that were skipped
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// True if every non-blank line was understood
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// A decoded ledger together with its load report
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    /// The reconstructed ledger
    pub ledger: Ledger,
    /// Lines skipped while decoding
    pub report: LoadReport,
}

/// Encode the ledger as snapshot text
///
/// Emits all `L` lines, then `F` (sorted by address for stable output),
/// then `A`, then `D`. Every line ends with `\n`.
pub fn encode(ledger: &Ledger) -> String {
    let mut out = String::new();
    for line in encode_lines(ledger) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn encode_lines(ledger: &Ledger) -> Vec<String> {
    let mut lines = Vec::new();

    for attempt in ledger.events() {
        let success = match attempt.was_successful() {
            true => "true",
            false => "false",
        };
        lines.push(join_fields([
            TAG_LOGIN,
            escape(attempt.username()).as_str(),
            escape(attempt.ip_address()).as_str(),
            escape(attempt.timestamp()).as_str(),
            success,
        ]));
    }

    let mut counts: Vec<(&str, u32)> = ledger.failure_counts().collect();
    counts.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (ip, count) in counts {
        lines.push(join_fields([
            TAG_FAILURES,
            escape(ip).as_str(),
            count.to_string().as_str(),
        ]));
    }

    for alert in ledger.pending_alerts() {
        lines.push(alert_line(TAG_PENDING, alert));
    }

    for alert in ledger.dismissed_alerts().iter_bottom_up() {
        lines.push(alert_line(TAG_DISMISSED, alert));
    }

    lines
}

fn alert_line(tag: &str, alert: &Alert) -> String {
    join_fields([
        tag,
        escape(alert.ip_address()).as_str(),
        escape(alert.message()).as_str(),
        escape(alert.timestamp()).as_str(),
    ])
}

/// Write the snapshot to any writer
pub fn write_to<W: Write>(ledger: &Ledger, mut writer: W) -> std::io::Result<()> {
    for line in encode_lines(ledger) {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Decode snapshot text
pub fn decode(text: &str) -> Result<LoadedSnapshot> {
    let mut builder = SnapshotBuilder::default();
    for (idx, line) in text.lines().enumerate() {
        builder.accept(idx + 1, line)?;
    }
    Ok(builder.finish())
}

/// Decode a snapshot from a buffered reader
///
/// `path` is only used to label I/O errors.
pub fn read_from<R: BufRead>(reader: R, path: &Path) -> Result<LoadedSnapshot> {
    let mut builder = SnapshotBuilder::default();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| LedgerError::io(path, e))?;
        builder.accept(idx + 1, &line)?;
    }
    Ok(builder.finish())
}

/// Load a snapshot file
pub fn load_from_path(path: impl AsRef<Path>) -> Result<LoadedSnapshot> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LedgerError::io(path, e))?;
    let loaded = read_from(BufReader::new(file), path)?;

    for skipped in &loaded.report.skipped {
        warn!(
            path = %path.display(),
            line = skipped.line,
            reason = ?skipped.reason,
            "Skipped malformed snapshot line"
        );
    }
    info!(
        path = %path.display(),
        summary = %loaded.ledger.summary(),
        "Loaded ledger snapshot"
    );
    Ok(loaded)
}

/// Save a snapshot file
///
/// Writes a sibling `.tmp` file, syncs it and renames it over `path`, so an
/// interrupted save never truncates an existing snapshot.
pub fn save_to_path(ledger: &Ledger, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LedgerError::io(parent, e))?;
    }

    let tmp = temp_path(path);
    if let Err(err) = write_temp(ledger, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(LedgerError::io(path, e));
    }

    info!(
        path = %path.display(),
        summary = %ledger.summary(),
        "Saved ledger snapshot"
    );
    Ok(())
}

fn write_temp(ledger: &Ledger, tmp: &Path) -> Result<()> {
    let file = File::create(tmp).map_err(|e| LedgerError::io(tmp, e))?;
    let mut writer = BufWriter::new(file);
    write_to(ledger, &mut writer).map_err(|e| LedgerError::io(tmp, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| LedgerError::io(tmp, e.into_error()))?;
    file.sync_all().map_err(|e| LedgerError::io(tmp, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Scratch state filled line by line, turned into a ledger at the end
#[derive(Default)]
struct SnapshotBuilder {
    events: Vec<LoginAttempt>,
    failure_counts: HashMap<String, u32>,
    backlog: VecDeque<Alert>,
    dismissed: DismissalStack,
    report: LoadReport,
}

impl SnapshotBuilder {
    fn accept(&mut self, line_no: usize, raw: &str) -> Result<()> {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            return Ok(());
        }

        let fields = split_fields(line);
        let tag = fields[0];
        match tag {
            TAG_LOGIN => {
                if self.require(line_no, &fields, 5) {
                    self.events.push(LoginAttempt::new(
                        unescape(fields[1]),
                        unescape(fields[2]),
                        unescape(fields[3]),
                        fields[4].eq_ignore_ascii_case("true"),
                    ));
                }
            }
            TAG_FAILURES => {
                if self.require(line_no, &fields, 3) {
                    let Ok(count) = fields[2].parse::<u32>() else {
                        return Err(LedgerError::MalformedCount {
                            line: line_no,
                            value: fields[2].to_string(),
                        });
                    };
                    self.failure_counts.insert(unescape(fields[1]), count);
                }
            }
            TAG_PENDING => {
                if self.require(line_no, &fields, 4) {
                    self.backlog.push_back(parse_alert(&fields));
                }
            }
            TAG_DISMISSED => {
                if self.require(line_no, &fields, 4) {
                    self.dismissed.push(parse_alert(&fields));
                }
            }
            other => {
                debug!(line = line_no, tag = %other, "Ignoring unknown snapshot tag");
                self.report.skipped.push(SkippedLine {
                    line: line_no,
                    reason: SkipReason::UnknownTag(other.to_string()),
                });
            }
        }
        Ok(())
    }

    fn require(&mut self, line_no: usize, fields: &[&str], expected: usize) -> bool {
        if fields.len() >= expected {
            return true;
        }
        debug!(
            line = line_no,
            expected,
            found = fields.len(),
            "Ignoring truncated snapshot line"
        );
        self.report.skipped.push(SkippedLine {
            line: line_no,
            reason: SkipReason::Truncated {
                tag: fields[0].to_string(),
                expected,
                found: fields.len(),
            },
        });
        false
    }

    fn finish(self) -> LoadedSnapshot {
        LoadedSnapshot {
            ledger: Ledger::from_parts(
                self.events,
                self.failure_counts,
                self.backlog,
                self.dismissed,
            ),
            report: self.report,
        }
    }
}

fn parse_alert(fields: &[&str]) -> Alert {
    Alert::new(
        unescape(fields[1]),
        unescape(fields[2]),
        unescape(fields[3]),
    )
}
