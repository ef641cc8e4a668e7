//! Login attempt and alert records
//!
//! Both types are plain immutable values: fields are set at construction
//! and only exposed through getters.

use std::cmp::Ordering;
use std::fmt;

/// A single recorded login attempt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginAttempt {
    username: String,
    ip_address: String,
    timestamp: String,
    success: bool,
}

impl LoginAttempt {
    /// Create a login attempt. Inputs are stored verbatim.
    pub fn new(
        username: impl Into<String>,
        ip_address: impl Into<String>,
        timestamp: impl Into<String>,
        success: bool,
    ) -> Self {
        Self {
            username: username.into(),
            ip_address: ip_address.into(),
            timestamp: timestamp.into(),
            success,
        }
    }

    /// Username that attempted to log in
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Source IP address, as entered
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// Opaque timestamp string
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Whether the login succeeded
    pub fn was_successful(&self) -> bool {
        self.success
    }

    /// Case-insensitive lexicographic ordering by username
    ///
    /// Equal keys compare `Equal`, so a sort that only swaps on `Greater`
    /// keeps their relative order.
    pub fn cmp_username(&self, other: &Self) -> Ordering {
        self.username
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(other.username.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for LoginAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User: {} | IP: {} | Time: {} | Success: {}",
            self.username, self.ip_address, self.timestamp, self.success
        )
    }
}

/// An alert raised for a suspicious address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alert {
    ip_address: String,
    message: String,
    timestamp: String,
}

impl Alert {
    /// Create an alert
    pub fn new(
        ip_address: impl Into<String>,
        message: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Offending IP address
    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }

    /// Human-readable description
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Timestamp of the attempt that raised the alert
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ALERT] IP: {} | {} | Time: {}",
            self.ip_address, self.message, self.timestamp
        )
    }
}
