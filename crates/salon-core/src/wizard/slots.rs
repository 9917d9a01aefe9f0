//! Slot helpers: the wall clock, the booking window and the past-time filter.

use jiff::{
    civil::{Date, DateTime},
    ToSpan, Zoned,
};

use crate::models::TimeSlot;

/// Source of "now" for the wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// Local wall-clock time in the system time zone
    #[default]
    System,
    /// A frozen instant
    Fixed(DateTime),
}

impl Clock {
    pub fn now(&self) -> DateTime {
        match self {
            Clock::System => Zoned::now().datetime(),
            Clock::Fixed(now) => *now,
        }
    }

    pub fn today(&self) -> Date {
        self.now().date()
    }
}

/// First and last bookable dates, inclusive.
pub fn booking_window(today: Date, days: i32) -> (Date, Date) {
    let last = today.checked_add(days.days()).unwrap_or(Date::MAX);
    (today, last)
}

/// Marks slots that start before `now` as unavailable when `date` is today.
///
/// The backend remains the source of truth; this only covers the gap between
/// its notion of "now" and the user's.
pub fn mark_past_slots(slots: &mut [TimeSlot], date: Date, now: DateTime) {
    if date != now.date() {
        return;
    }
    let current = now.time();
    for slot in slots.iter_mut() {
        if slot.time_of_day().is_some_and(|start| start < current) {
            slot.available = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_past_slots_today_become_unavailable() {
        let today = date(2026, 10, 19);
        let mut slots = vec![TimeSlot::available("17:30"), TimeSlot::available("18:30")];

        mark_past_slots(&mut slots, today, today.at(18, 5, 0, 0));

        assert!(!slots[0].available);
        assert!(slots[1].available);
    }

    #[test]
    fn test_other_days_are_untouched() {
        let today = date(2026, 10, 19);
        let mut slots = vec![TimeSlot::available("09:00")];

        mark_past_slots(&mut slots, date(2026, 10, 20), today.at(18, 5, 0, 0));

        assert!(slots[0].available);
    }

    #[test]
    fn test_slot_at_current_minute_stays_available() {
        let today = date(2026, 10, 19);
        let mut slots = vec![TimeSlot::available("18:05")];

        mark_past_slots(&mut slots, today, today.at(18, 5, 0, 0));

        assert!(slots[0].available);
    }

    #[test]
    fn test_booking_window_spans_thirty_days() {
        let (first, last) = booking_window(date(2026, 10, 19), 30);
        assert_eq!(first, date(2026, 10, 19));
        assert_eq!(last, date(2026, 11, 18));
    }
}
