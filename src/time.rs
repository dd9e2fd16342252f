//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting mock clocks
//! in tests while using the real system clock in production. The sender reads
//! the clock exactly once per delivery attempt and formats the value with
//! [`rfc3339`].

use chrono::{DateTime, SecondsFormat, Utc};

/// Abstraction over wall-clock time for testability.
///
/// # Example
///
/// ```
/// use webhook_reporter::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats a timestamp as RFC3339 in UTC with second precision.
///
/// Sub-second components are truncated and the offset is always `Z`,
/// e.g. `2024-05-01T12:30:00Z`.
#[must_use]
pub fn rfc3339(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
