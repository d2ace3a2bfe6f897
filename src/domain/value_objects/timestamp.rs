//! # Timestamp Value Object
//!
//! DateTime wrapper with domain-specific methods.
//!
//! # Examples
//!
//! ```
//! use ship_quote::domain::value_objects::timestamp::Timestamp;
//!
//! let now = Timestamp::now();
//! let later = now.add_secs(60);
//! assert!(later.is_after(&now));
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>` with the handful of operations the quoting
/// pipeline needs: creation time on records and label filename stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Compact filename-safe format: `YYYYMMDD_HHMMSS`.
    pub const COMPACT_FORMAT: &'static str = "%Y%m%d_%H%M%S";

    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a `chrono` datetime.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying datetime.
    #[inline]
    #[must_use]
    pub fn get(&self) -> DateTime<Utc> {
        self.0
    }

    /// Returns a new timestamp advanced by the given number of seconds.
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Returns true if this timestamp is strictly after the other.
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Formats the timestamp in the compact filename-safe format.
    #[must_use]
    pub fn compact(&self) -> String {
        self.0.format(Self::COMPACT_FORMAT).to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn add_secs_advances() {
        let now = Timestamp::now();
        let later = now.add_secs(60);
        assert!(later.is_after(&now));
        assert!(!now.is_after(&later));
    }

    #[test]
    fn compact_format() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.compact(), "20240305_143009");
    }

    #[test]
    fn display_is_rfc3339() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
        let ts = Timestamp::from_datetime(dt);
        assert!(ts.to_string().starts_with("2024-03-05T14:30:09"));
    }

    #[test]
    fn serde_is_transparent() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 9).unwrap();
        let ts = Timestamp::from_datetime(dt);
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
