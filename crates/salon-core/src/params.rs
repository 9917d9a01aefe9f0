//! Parameter structures for booking operations
//!
//! Shared, interface-agnostic parameter types. The CLI builds these from its
//! clap argument wrappers (see `salon-cli/src/cli.rs`) and the wizard builds
//! them from its selection state; neither side leaks framework derives into
//! the other.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   HttpBackend   │
//! │  (clap derives) │───▶│ (minimal deps)  │───▶│  (wire shapes)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::ContactInfo;

/// Generic parameters for operations requiring just an ID.
///
/// Used for showing and cancelling bookings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters of one availability query.
///
/// Two queries are equal exactly when they would ask the backend the same
/// question, which is what the wizard uses to discard stale slot responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub stylist_id: u64,
    pub date: Date,
    /// Summed duration of every selected service, in minutes
    pub duration: u32,
}

/// Parameters for creating a booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateBooking {
    /// Selected services in selection order
    pub service_ids: Vec<u64>,
    pub stylist_id: u64,
    pub date: Date,
    /// Start time label (`HH:MM`)
    pub time: String,
    pub contact: ContactInfo,
}

/// Email/password credentials for the backend login endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
