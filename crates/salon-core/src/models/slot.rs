//! Time slot model.

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

/// A bookable time-of-day for one (stylist, date, duration) query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    /// Time-of-day label in `HH:MM` form
    pub time: String,

    /// Whether the slot can still be selected
    pub available: bool,
}

impl TimeSlot {
    /// Creates an available slot with the given label.
    pub fn available(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            available: true,
        }
    }

    /// Creates an unavailable slot with the given label.
    pub fn unavailable(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            available: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Parses the label as a civil time of day.
    ///
    /// Returns `None` for labels that are not `HH:MM` (or `HH:MM:SS`).
    pub fn time_of_day(&self) -> Option<Time> {
        parse_time_label(&self.time)
    }
}

/// Parses an `HH:MM` or `HH:MM:SS` label into a civil time.
pub fn parse_time_label(label: &str) -> Option<Time> {
    let mut parts = label.trim().split(':');
    let hour: i8 = parts.next()?.parse().ok()?;
    let minute: i8 = parts.next()?.parse().ok()?;
    let second: i8 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }
    Time::new(hour, minute, second, 0).ok()
}
