//! Service model definition.

use serde::{Deserialize, Serialize};

/// A bookable salon service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Service {
    /// Unique identifier assigned by the backend
    pub id: u64,

    /// Display name
    pub name: String,

    /// Category tag used to match stylist specialties (e.g. "hair", "nail")
    pub category: String,

    /// Short description of what the service includes
    pub description: String,

    /// Length of the appointment in minutes
    pub duration: u32,

    /// Price in whole currency units
    pub price: u32,

    /// Optional image reference (URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Inactive services are hidden from the wizard
    pub is_active: bool,
}
