//! Display implementations for domain models.
//!
//! All output is markdown: `##` headers for catalogue entries, `#` for a
//! single booking, and `-` bullet metadata underneath.

use std::fmt;

use super::datetime::{LocalDateTime, Money};
use crate::{
    models::{Booking, BookingStatus, Branding, Identity, Service, Stylist, TimeSlot},
    wizard::Step,
};

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of 4: {}", self.number(), self.title())
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}. {}", self.id, self.name)?;
        writeln!(f)?;
        if !self.category.is_empty() {
            writeln!(f, "- Category: {}", self.category)?;
        }
        writeln!(f, "- Duration: {} min", self.duration)?;
        writeln!(f, "- Price: {}", Money(self.price))?;
        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Stylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}. {}", self.id, self.name)?;
        writeln!(f)?;
        if !self.specialty.is_empty() {
            writeln!(f, "- Specialty: {}", self.specialty.join(", "))?;
        }
        writeln!(f, "- Experience: {} years", self.experience)?;
        if let Some(rating) = self.rating {
            writeln!(f, "- Rating: {rating:.1}")?;
        }
        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.available {
            write!(f, "{}", self.time)
        } else {
            write!(f, "~~{}~~ (unavailable)", self.time)
        }
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Booking {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- When: {} {}", self.date, self.time)?;
        writeln!(f, "- Stylist: #{}", self.stylist_id)?;
        let services: Vec<String> = self.service_ids.iter().map(|id| format!("#{id}")).collect();
        writeln!(f, "- Services: {}", services.join(", "))?;
        writeln!(f, "- Customer: {} ({})", self.customer_name, self.customer_phone)?;
        if let Some(email) = &self.customer_email {
            writeln!(f, "- Email: {email}")?;
        }
        match (self.total_price, self.total_duration) {
            (Some(price), Some(duration)) => {
                writeln!(f, "- Total: {} / {duration} min", Money(price))?
            }
            (Some(price), None) => writeln!(f, "- Total: {}", Money(price))?,
            (None, Some(duration)) => writeln!(f, "- Duration: {duration} min")?,
            (None, None) => {}
        }
        if let Some(created_at) = &self.created_at {
            writeln!(f, "- Booked: {}", LocalDateTime(created_at))?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        if let Some(email) = &self.email {
            writeln!(f, "- Email: {email}")?;
        }
        if let Some(phone) = &self.phone {
            writeln!(f, "- Phone: {phone}")?;
        }
        if let Some(role) = &self.role {
            writeln!(f, "- Role: {role}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Branding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
            writeln!(f)?;
        }
        writeln!(f, "- Short name: {}", self.short_name)?;
        writeln!(f, "- Theme colour: {}", self.theme_color)?;
        writeln!(f, "- Background colour: {}", self.background_color)?;
        if !self.logo.is_empty() {
            writeln!(f, "- Logo: {}", self.logo)?;
        }
        Ok(())
    }
}
