//! Authenticated identity, session tokens and customer contact details.

use serde::{Deserialize, Serialize};

/// The signed-in customer as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Bearer tokens issued by the backend's auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Contact details submitted with a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

impl From<&Identity> for ContactInfo {
    /// Pre-seeds contact fields from the signed-in identity; notes stay empty.
    fn from(identity: &Identity) -> Self {
        ContactInfo {
            name: identity.name.clone(),
            phone: identity.phone.clone().unwrap_or_default(),
            email: identity.email.clone().unwrap_or_default(),
            notes: String::new(),
        }
    }
}
