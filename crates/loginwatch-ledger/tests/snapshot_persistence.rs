#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Snapshot persistence tests
//!
//! Save/load through real files, tolerant decoding of damaged snapshots and
//! the guarantee that a rejected load never touches the caller's ledger.

use assert_matches::assert_matches;
use loginwatch_ledger::snapshot::{self, SkipReason};
use loginwatch_ledger::{Alert, Ledger, LedgerError};
use loginwatch_testkit::fixtures::{ledger_with_backlog, ledger_with_every_record_kind};
use loginwatch_testkit::strategies::arb_ledger;
use proptest::prelude::*;
use tempfile::TempDir;

fn pending_ips(ledger: &Ledger) -> Vec<String> {
    ledger
        .pending_alerts()
        .map(|a| a.ip_address().to_string())
        .collect()
}

fn dismissed_ips(ledger: &Ledger) -> Vec<String> {
    ledger
        .dismissed_alerts()
        .iter_bottom_up()
        .map(|a| a.ip_address().to_string())
        .collect()
}

#[test]
fn test_save_then_load_reproduces_state() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sld_system_data.txt");
    let original = ledger_with_every_record_kind();

    snapshot::save_to_path(&original, &path).unwrap();
    let loaded = snapshot::load_from_path(&path).unwrap();

    assert!(loaded.report.is_clean());
    assert_eq!(loaded.ledger.events(), original.events());
    assert_eq!(pending_ips(&loaded.ledger), pending_ips(&original));
    assert_eq!(dismissed_ips(&loaded.ledger), dismissed_ips(&original));
    assert_eq!(
        loaded.ledger.failure_count("10.0.0.5|x"),
        original.failure_count("10.0.0.5|x")
    );
    assert_eq!(loaded.ledger, original);
    assert!(!dir.path().join("sld_system_data.txt.tmp").exists());
}

#[test]
fn test_loaded_undo_top_matches_original() {
    let original = ledger_with_every_record_kind();
    let text = snapshot::encode(&original);
    let mut loaded = snapshot::decode(&text).unwrap().ledger;
    let mut expected = original.clone();

    assert_eq!(
        loaded.undo_last_dismissal().cloned(),
        expected.undo_last_dismissal().cloned()
    );
    assert_eq!(pending_ips(&loaded), pending_ips(&expected));
}

#[test]
fn test_truncated_alert_line_is_skipped() {
    let text = "\
L|eve|10.0.0.5|t1|false
A|10.0.0.5|Multiple failed login attempts detected.
A|10.0.0.6|Multiple failed login attempts detected.|t9
F|10.0.0.5|1
D|10.0.0.7|Dismissed earlier|t0
";
    let loaded = snapshot::decode(text).unwrap();

    assert_eq!(loaded.ledger.events().len(), 1);
    assert_eq!(pending_ips(&loaded.ledger), vec!["10.0.0.6"]);
    assert_eq!(dismissed_ips(&loaded.ledger), vec!["10.0.0.7"]);
    assert_eq!(loaded.ledger.failure_count("10.0.0.5"), 1);

    assert_eq!(loaded.report.skipped.len(), 1);
    assert_eq!(loaded.report.skipped[0].line, 2);
    assert_matches!(
        &loaded.report.skipped[0].reason,
        SkipReason::Truncated { tag, expected: 4, found: 3 } if tag == "A"
    );
}

#[test]
fn test_tags_may_appear_in_any_order() {
    let text = "D|d1|m|t\nA|a1|m|t\nF|x|2\nL|u|x|t|false\nD|d2|m|t\nA|a2|m|t\n";
    let loaded = snapshot::decode(text).unwrap().ledger;

    assert_eq!(pending_ips(&loaded), vec!["a1", "a2"]);
    assert_eq!(dismissed_ips(&loaded), vec!["d1", "d2"]);
    assert_eq!(loaded.failure_count("x"), 2);
}

#[test]
fn test_failed_load_leaves_current_ledger_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.txt");
    std::fs::write(&path, "L|a|1.1.1.1|t|false\nF|1.1.1.1|not-a-number\n").unwrap();

    let mut current = ledger_with_backlog(&["10.0.0.1"]);
    let before = current.clone();

    match snapshot::load_from_path(&path) {
        Ok(loaded) => current = loaded.ledger,
        Err(err) => assert_matches!(err, LedgerError::MalformedCount { line: 2, .. }),
    }
    assert_eq!(current, before);
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = snapshot::load_from_path(dir.path().join("absent.txt")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_save_into_missing_directory_creates_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data.txt");
    snapshot::save_to_path(&ledger_with_backlog(&["1.2.3.4"]), &path).unwrap();

    let loaded = snapshot::load_from_path(&path).unwrap().ledger;
    assert_eq!(
        loaded.pending_alerts().cloned().collect::<Vec<Alert>>(),
        vec![Alert::new(
            "1.2.3.4",
            loginwatch_ledger::ALERT_MESSAGE,
            "2025-11-23 14:00"
        )]
    );
}

#[test]
fn test_save_over_directory_fails_with_io_error() {
    let dir = TempDir::new().unwrap();
    let err = snapshot::save_to_path(&Ledger::new(), dir.path()).unwrap_err();
    assert_matches!(err, LedgerError::Io { .. });
}

#[test]
fn test_failed_rename_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.txt");
    std::fs::create_dir(&path).unwrap();
    std::fs::write(path.join("keep.txt"), "unrelated").unwrap();

    let ledger = ledger_with_backlog(&["10.0.0.1"]);
    let err = snapshot::save_to_path(&ledger, &path).unwrap_err();

    assert_matches!(err, LedgerError::Io { .. });
    assert!(!dir.path().join("data.txt.tmp").exists());
    assert!(path.is_dir());
    let kept = std::fs::read_to_string(path.join("keep.txt")).unwrap();
    assert_eq!(kept, "unrelated");
}

#[test]
fn test_failed_temp_write_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.txt");
    let previous = ledger_with_every_record_kind();
    snapshot::save_to_path(&previous, &path).unwrap();
    let before = std::fs::read(&path).unwrap();

    // A directory squatting on the temp name makes the temp write fail
    std::fs::create_dir(dir.path().join("data.txt.tmp")).unwrap();
    let err = snapshot::save_to_path(&Ledger::new(), &path).unwrap_err();

    assert_matches!(err, LedgerError::Io { .. });
    assert_eq!(std::fs::read(&path).unwrap(), before);
    let reloaded = snapshot::load_from_path(&path).unwrap().ledger;
    assert_eq!(reloaded, previous);
}

proptest! {
    /// Property: decode(encode(ledger)) reproduces the ledger
    #[test]
    fn prop_snapshot_roundtrip(ledger in arb_ledger()) {
        let loaded = snapshot::decode(&snapshot::encode(&ledger)).unwrap();
        prop_assert!(loaded.report.is_clean());
        prop_assert_eq!(loaded.ledger, ledger);
    }
}
