//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with its own message.

use std::{fmt, ops::Index};

use crate::models::{Booking, Service, Stylist, TimeSlot};

/// Newtype wrapper for displaying the service catalogue.
///
/// # Examples
///
/// ```rust
/// use salon_core::{display::Services, models::Service};
///
/// let services = Services(vec![Service {
///     id: 1,
///     name: "Haircut".to_string(),
///     category: "hair".to_string(),
///     description: String::new(),
///     duration: 60,
///     price: 800,
///     image: None,
///     is_active: true,
/// }]);
/// let output = format!("{}", services);
/// assert!(output.contains("## 1. Haircut"));
/// assert!(output.contains("NT$ 800"));
/// ```
pub struct Services(pub Vec<Service>);

impl Services {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Service> {
        self.0.iter()
    }
}

impl Index<usize> for Services {
    type Output = Service;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No services available.")
        } else {
            for service in &self.0 {
                write!(f, "{}", service)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying stylists.
pub struct Stylists(pub Vec<Stylist>);

impl Stylists {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Stylists {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No stylists available.")
        } else {
            for stylist in &self.0 {
                write!(f, "{}", stylist)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for a slot list, one bullet per slot.
pub struct TimeSlots<'a>(pub &'a [TimeSlot]);

impl<'a> fmt::Display for TimeSlots<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No time slots available for this day.");
        }
        for slot in self.0 {
            writeln!(f, "- {slot}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for a customer's bookings.
pub struct Bookings(pub Vec<Booking>);

impl Bookings {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl IntoIterator for Bookings {
    type Item = Booking;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Bookings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No bookings found.");
        }
        for booking in &self.0 {
            writeln!(
                f,
                "- #{} {} {} ({}) with stylist #{}",
                booking.id, booking.date, booking.time, booking.status, booking.stylist_id
            )?;
        }
        Ok(())
    }
}
