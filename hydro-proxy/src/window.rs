//! Time windows for readings queries.

use chrono::prelude::*;
use chrono::Duration;

/// Format the upstream expects for `?since=`.
pub const SINCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// How far back a readings query looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The last 24 hours.
    Day,
    /// The last 7 days.
    Week
}
impl Period {
    /// Map a `?period=` token to a window.
    ///
    /// Only `7d`, `week` and `7days` select a week; everything else,
    /// including no token at all, is a day.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("7d") | Some("week") | Some("7days") => Period::Week,
            _ => Period::Day
        }
    }
    pub fn duration(self) -> Duration {
        match self {
            Period::Day => Duration::hours(24),
            Period::Week => Duration::days(7)
        }
    }
    /// The start of this window, counting back from `now`.
    pub fn since_at(self, now: DateTime<Utc>) -> String {
        (now - self.duration()).format(SINCE_FORMAT).to_string()
    }
    /// Convenience wrapper around `since_at` using the real current time.
    pub fn since(self) -> String {
        self.since_at(Utc::now())
    }
}
