//! Ledger store
//!
//! Owns the event log, the per-address failure counters, the pending alert
//! backlog and the undo history of dismissed alerts.
//!
//! # Invariants
//!
//! - The event log only grows; [`Ledger::sort_by_username`] reorders it in place.
//! - `failure_count(ip)` equals the number of failed attempts recorded for `ip`
//!   since the ledger was created or loaded.
//! - An alert is raised exactly once per address, when its count becomes
//!   [`FAILURE_THRESHOLD`].
//! - Every raised alert is in exactly one of the backlog or the undo history.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use tracing::{debug, warn};

use crate::records::{Alert, LoginAttempt};

/// Failed attempts from one address that raise an alert
pub const FAILURE_THRESHOLD: u32 = 3;

/// Message carried by threshold alerts
pub const ALERT_MESSAGE: &str = "Multiple failed login attempts detected.";

/// Result of [`Ledger::sort_by_username`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    /// The log was sorted
    Sorted,
    /// Fewer than two events; nothing to do
    NotEnoughEntries,
}

/// Counts shown in status displays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Recorded login attempts
    pub event_count: usize,
    /// Alerts waiting in the backlog
    pub pending_alert_count: usize,
    /// Dismissed alerts available for undo
    pub dismissed_count: usize,
}

impl fmt::Display for LedgerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Logs={} | Alerts pending={} | Dismissed={}",
            self.event_count, self.pending_alert_count, self.dismissed_count
        )
    }
}

/// LIFO history of dismissed alerts
///
/// Normal operation only pushes and pops the top. [`DismissalStack::iter_bottom_up`]
/// exists for the snapshot writer, which needs the oldest dismissal first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DismissalStack {
    entries: Vec<Alert>,
}

impl DismissalStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an alert on top
    pub fn push(&mut self, alert: Alert) {
        self.entries.push(alert);
    }

    /// Remove and return the most recently pushed alert
    pub fn pop(&mut self) -> Option<Alert> {
        self.entries.pop()
    }

    /// Most recently pushed alert
    pub fn peek(&self) -> Option<&Alert> {
        self.entries.last()
    }

    /// Number of dismissed alerts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been dismissed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only traversal from the oldest dismissal to the top
    pub fn iter_bottom_up(&self) -> impl ExactSizeIterator<Item = &Alert> {
        self.entries.iter()
    }
}

/// In-memory security event ledger
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    events: Vec<LoginAttempt>,
    failure_counts: HashMap<String, u32>,
    backlog: VecDeque<Alert>,
    dismissed: DismissalStack,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from previously persisted parts
    ///
    /// `dismissed` is given bottom to top. Used by the snapshot reader; no
    /// threshold logic runs.
    pub fn from_parts(
        events: Vec<LoginAttempt>,
        failure_counts: HashMap<String, u32>,
        backlog: VecDeque<Alert>,
        dismissed: DismissalStack,
    ) -> Self {
        Self {
            events,
            failure_counts,
            backlog,
            dismissed,
        }
    }

    /// Record a login attempt
    ///
    /// A failed attempt bumps the counter for `ip_address`. When that counter
    /// reaches [`FAILURE_THRESHOLD`] exactly, an alert is queued at the tail
    /// of the backlog and a copy is returned so the caller can surface it.
    pub fn record_attempt(
        &mut self,
        username: impl Into<String>,
        ip_address: impl Into<String>,
        timestamp: impl Into<String>,
        success: bool,
    ) -> Option<Alert> {
        let attempt = LoginAttempt::new(username, ip_address, timestamp, success);
        debug!(
            username = %attempt.username(),
            ip = %attempt.ip_address(),
            success,
            "Recording login attempt"
        );

        let raised = if success {
            None
        } else {
            let count = self
                .failure_counts
                .entry(attempt.ip_address().to_string())
                .or_insert(0);
            *count = count.saturating_add(1);

            if *count == FAILURE_THRESHOLD {
                let alert = Alert::new(attempt.ip_address(), ALERT_MESSAGE, attempt.timestamp());
                warn!(ip = %alert.ip_address(), "Alert generated: suspicious address");
                self.backlog.push_back(alert.clone());
                Some(alert)
            } else {
                None
            }
        };

        self.events.push(attempt);
        raised
    }

    /// Events in stored order
    pub fn events(&self) -> &[LoginAttempt] {
        &self.events
    }

    /// Sort the event log by username, case-insensitive and stable
    ///
    /// Bubble sort that swaps only strictly-greater neighbours, which is what
    /// keeps equal usernames in their original relative order.
    pub fn sort_by_username(&mut self) -> SortOutcome {
        let len = self.events.len();
        if len < 2 {
            return SortOutcome::NotEnoughEntries;
        }

        for pass in 0..len - 1 {
            let mut swapped = false;
            for j in 0..len - pass - 1 {
                if self.events[j].cmp_username(&self.events[j + 1]).is_gt() {
                    self.events.swap(j, j + 1);
                    swapped = true;
                }
            }
            if !swapped {
                break;
            }
        }

        debug!(events = len, "Sorted event log by username");
        SortOutcome::Sorted
    }

    /// Pending alerts, oldest first
    pub fn pending_alerts(&self) -> impl ExactSizeIterator<Item = &Alert> {
        self.backlog.iter()
    }

    /// Dismiss the oldest pending alert
    ///
    /// The alert moves onto the undo history. Returns `None` without touching
    /// either collection when the backlog is empty.
    pub fn dismiss_next(&mut self) -> Option<&Alert> {
        let alert = self.backlog.pop_front()?;
        debug!(ip = %alert.ip_address(), "Dismissed alert");
        self.dismissed.push(alert);
        self.dismissed.peek()
    }

    /// Restore the most recently dismissed alert
    ///
    /// The alert is appended to the tail of the backlog, not its original
    /// position. Returns `None` when there is nothing to undo.
    pub fn undo_last_dismissal(&mut self) -> Option<&Alert> {
        let alert = self.dismissed.pop()?;
        debug!(ip = %alert.ip_address(), "Restored dismissed alert");
        self.backlog.push_back(alert);
        self.backlog.back()
    }

    /// Dismissed alerts available for undo
    pub fn dismissed_alerts(&self) -> &DismissalStack {
        &self.dismissed
    }

    /// Failed attempts recorded for `ip_address`
    pub fn failure_count(&self, ip_address: &str) -> u32 {
        self.failure_counts.get(ip_address).copied().unwrap_or(0)
    }

    /// All failure counters, in no particular order
    pub fn failure_counts(&self) -> impl Iterator<Item = (&str, u32)> {
        self.failure_counts
            .iter()
            .map(|(ip, count)| (ip.as_str(), *count))
    }

    /// True if any collection holds data
    pub fn has_data(&self) -> bool {
        !self.events.is_empty()
            || !self.failure_counts.is_empty()
            || !self.backlog.is_empty()
            || !self.dismissed.is_empty()
    }

    /// Counts for status display
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            event_count: self.events.len(),
            pending_alert_count: self.backlog.len(),
            dismissed_count: self.dismissed.len(),
        }
    }
}
