//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{models::Booking, wizard::Confirmation};

/// Wrapper type for displaying a freshly created booking.
///
/// # Examples
///
/// ```rust
/// use jiff::civil::date;
/// use salon_core::{
///     display::BookingConfirmation,
///     models::{Booking, BookingStatus},
///     wizard::Confirmation,
/// };
///
/// let booking = Booking {
///     id: 42,
///     service_ids: vec![1],
///     stylist_id: 4,
///     date: date(2026, 10, 20),
///     time: "18:30".to_string(),
///     customer_name: "Amy".to_string(),
///     customer_phone: "0912345678".to_string(),
///     customer_email: None,
///     notes: None,
///     status: BookingStatus::Pending,
///     total_price: Some(800),
///     total_duration: Some(60),
///     created_at: None,
/// };
/// let confirmation = Confirmation { booking_id: 42, booking };
/// let output = BookingConfirmation(&confirmation).to_string();
/// assert!(output.starts_with("Booking confirmed. Reference: 42"));
/// ```
pub struct BookingConfirmation<'a>(pub &'a Confirmation);

impl<'a> fmt::Display for BookingConfirmation<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Booking confirmed. Reference: {}", self.0.booking_id)?;
        writeln!(f)?;
        write!(f, "{}", self.0.booking)
    }
}

/// Wrapper type for displaying the result of a cancellation.
pub struct CancelResult(pub Booking);

impl fmt::Display for CancelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cancelled booking {} on {} at {}",
            self.0.id, self.0.date, self.0.time
        )
    }
}
