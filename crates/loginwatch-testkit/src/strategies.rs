//! Property test strategies for ledger types
//!
//! Text strategies are biased towards the characters the snapshot format
//! has to escape, so round-trip properties hit the interesting cases often.

use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use loginwatch_ledger::{Alert, Ledger, LoginAttempt};

/// Strategy for free text heavy in `\`, `|`, CR, LF and escape letters
pub fn arb_field_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        3 => Just('\\'),
        3 => Just('|'),
        2 => Just('\n'),
        2 => Just('\r'),
        1 => Just('n'),
        1 => Just('r'),
        4 => any::<char>(),
    ];
    prop::collection::vec(piece, 0..24)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for an address drawn from a small pool so thresholds are reached
pub fn arb_ip() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["10.0.0.1", "10.0.0.2", "10.0.0.3", "a|b\\c"])
        .prop_map(str::to_string)
}

/// Strategy for usernames with mixed case and duplicates
pub fn arb_username() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["alice", "Alice", "bob", "BOB", "zed", "", "Émile"])
        .prop_map(str::to_string)
}

/// Strategy for a login attempt
pub fn arb_attempt() -> impl Strategy<Value = LoginAttempt> {
    (arb_username(), arb_ip(), arb_field_text(), any::<bool>()).prop_map(
        |(username, ip, timestamp, success)| LoginAttempt::new(username, ip, timestamp, success),
    )
}

/// An operation applied to a ledger by property tests
#[derive(Debug, Clone)]
pub enum LedgerOp {
    /// Record the attempt
    Record(LoginAttempt),
    /// Dismiss the next alert
    Dismiss,
    /// Undo the last dismissal
    Undo,
    /// Sort the event log
    Sort,
}

impl LedgerOp {
    /// Apply the operation, returning the alert it raised, if any
    pub fn apply(&self, ledger: &mut Ledger) -> Option<Alert> {
        match self {
            LedgerOp::Record(attempt) => ledger.record_attempt(
                attempt.username(),
                attempt.ip_address(),
                attempt.timestamp(),
                attempt.was_successful(),
            ),
            LedgerOp::Dismiss => {
                ledger.dismiss_next();
                None
            }
            LedgerOp::Undo => {
                ledger.undo_last_dismissal();
                None
            }
            LedgerOp::Sort => {
                ledger.sort_by_username();
                None
            }
        }
    }
}

/// Strategy for a single ledger operation, mostly records
pub fn arb_ledger_op() -> impl Strategy<Value = LedgerOp> {
    prop_oneof![
        6 => arb_attempt().prop_map(LedgerOp::Record),
        2 => Just(LedgerOp::Dismiss),
        2 => Just(LedgerOp::Undo),
        1 => Just(LedgerOp::Sort),
    ]
}

/// Strategy for a sequence of ledger operations
pub fn arb_ledger_ops() -> impl Strategy<Value = Vec<LedgerOp>> {
    prop::collection::vec(arb_ledger_op(), 0..64)
}

/// Strategy for a ledger built by replaying random operations
pub fn arb_ledger() -> impl Strategy<Value = Ledger> {
    arb_ledger_ops().prop_map(|ops| {
        let mut ledger = Ledger::new();
        for op in &ops {
            op.apply(&mut ledger);
        }
        ledger
    })
}
