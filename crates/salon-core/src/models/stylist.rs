//! Stylist model definition.

use serde::{Deserialize, Serialize};

/// A stylist who can be booked for services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stylist {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Service categories the stylist specialises in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialty: Vec<String>,

    /// Years of experience
    pub experience: u32,

    /// Average customer rating, when the backend reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Optional avatar reference (URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    pub is_active: bool,
}

impl Stylist {
    /// Whether the stylist lists the given service category as a specialty.
    pub fn specialises_in(&self, category: &str) -> bool {
        self.specialty
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(category))
    }
}
