//! Branding settings served by the backend.

use serde::{Deserialize, Serialize};

/// Salon branding shown in headers and confirmations.
///
/// The backend owns these values; [`Branding::default`] is used whenever the
/// settings endpoint cannot be reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Branding {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub logo: String,
    pub theme_color: String,
    pub background_color: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Linda Salon".to_string(),
            short_name: "Linda".to_string(),
            description: "Professional hair and beauty services".to_string(),
            logo: String::new(),
            theme_color: "#8B5CF6".to_string(),
            background_color: "#FFFFFF".to_string(),
        }
    }
}
