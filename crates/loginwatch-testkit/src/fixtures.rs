//! Ledger fixtures
//!
//! Builders for ledgers in known states, so tests can start from a
//! backlog or undo history without repeating the threshold dance.

use loginwatch_ledger::{Ledger, FAILURE_THRESHOLD};

/// Record exactly enough failures from `ip` to raise its alert
pub fn raise_alert(ledger: &mut Ledger, ip: &str, timestamp: &str) {
    let already = ledger.failure_count(ip);
    for _ in already..FAILURE_THRESHOLD {
        ledger.record_attempt("intruder", ip, timestamp, false);
    }
}

/// Ledger whose backlog holds one alert per address, in the given order
pub fn ledger_with_backlog(ips: &[&str]) -> Ledger {
    let mut ledger = Ledger::new();
    for ip in ips {
        raise_alert(&mut ledger, ip, "2025-11-23 14:00");
    }
    ledger
}

/// Ledger holding every persisted record kind, with awkward characters
///
/// - events whose fields contain `|`, `\` and newlines
/// - failure counters below, at and above the threshold
/// - two pending alerts and two dismissed ones
pub fn ledger_with_every_record_kind() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.record_attempt("Alice|Admin", "192.168.0.1", "2025-11-23 14:00", true);
    ledger.record_attempt("bob\\ops", "10.0.0.2", "line1\nline2", false);
    ledger.record_attempt("carol\r\n", "10.0.0.3", "", false);

    raise_alert(&mut ledger, "10.0.0.5|x", "t\\n");
    raise_alert(&mut ledger, "10.0.0.6", "2025-11-23 14:05");
    raise_alert(&mut ledger, "10.0.0.7", "2025-11-23 14:06");
    raise_alert(&mut ledger, "10.0.0.8", "2025-11-23 14:07");
    ledger.record_attempt("mallory", "10.0.0.5|x", "after", false);

    ledger.dismiss_next();
    ledger.dismiss_next();
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let ledger = ledger_with_every_record_kind();
        let summary = ledger.summary();
        assert_eq!(summary.pending_alert_count, 2);
        assert_eq!(summary.dismissed_count, 2);
        assert_eq!(ledger.failure_count("10.0.0.5|x"), FAILURE_THRESHOLD + 1);
        assert_eq!(ledger.failure_count("10.0.0.2"), 1);
    }

    #[test]
    fn test_raise_alert_tops_up_existing_count() {
        let mut ledger = Ledger::new();
        ledger.record_attempt("u", "1.1.1.1", "t", false);
        raise_alert(&mut ledger, "1.1.1.1", "t");
        assert_eq!(ledger.failure_count("1.1.1.1"), FAILURE_THRESHOLD);
        assert_eq!(ledger.pending_alerts().len(), 1);
    }
}
