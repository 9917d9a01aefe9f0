//! Booking model returned by the backend after creation.

use std::str::FromStr;

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking as tracked by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting confirmation by the salon
    #[default]
    Pending,

    /// Accepted by the salon
    Confirmed,

    /// Cancelled by the customer or the salon
    Cancelled,

    /// Appointment took place
    Completed,
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            _ => Err(format!("Invalid booking status: {s}")),
        }
    }
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// A booking as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    /// Server-assigned identifier; the confirmation view is keyed by it
    pub id: u64,

    /// Booked services in selection order
    pub service_ids: Vec<u64>,

    pub stylist_id: u64,

    pub date: Date,

    /// Start time label (`HH:MM`)
    pub time: String,

    pub customer_name: String,

    pub customer_phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub status: BookingStatus,

    /// Total price reported by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<u32>,

    /// Total duration in minutes reported by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
}
