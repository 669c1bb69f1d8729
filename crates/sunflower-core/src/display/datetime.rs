//! DateTime display utilities.
//!
//! This module provides wrapper types for formatting timestamps in a
//! consistent, human-readable format.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that provides system timezone formatting via
/// the `Display` trait.
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Calendar date of a planting event, formatted like `Jun 5, 2024`.
///
/// ```rust
/// use jiff::{tz::TimeZone, Timestamp};
/// use sunflower_core::display::PlantingDate;
///
/// let ts: Timestamp = "2024-06-05T12:00:00Z".parse().unwrap();
/// assert_eq!(PlantingDate::in_time_zone(ts, TimeZone::UTC).to_string(), "Jun 5, 2024");
/// ```
#[derive(Debug, Clone)]
pub struct PlantingDate {
    timestamp: Timestamp,
    time_zone: TimeZone,
}

impl PlantingDate {
    /// Formats `timestamp` in the system time zone.
    pub fn new(timestamp: Timestamp) -> Self {
        Self::in_time_zone(timestamp, TimeZone::system())
    }

    /// Formats `timestamp` in `time_zone`.
    pub fn in_time_zone(timestamp: Timestamp, time_zone: TimeZone) -> Self {
        Self {
            timestamp,
            time_zone,
        }
    }
}

impl fmt::Display for PlantingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.timestamp
                .to_zoned(self.time_zone.clone())
                .strftime("%b %-d, %Y")
        )
    }
}
