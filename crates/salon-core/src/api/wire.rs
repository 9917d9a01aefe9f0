//! Wire shapes exchanged with the booking backend.
//!
//! Responses are decoded into these deliberately loose structs first and
//! then narrowed into [`crate::models`] types with `TryFrom`. Anything the
//! rest of the crate relies on (names, positive durations, parseable dates
//! and time labels) is checked here, once.

use jiff::{civil::Date, Timestamp};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{BookingError, Result},
    models::{
        slot::parse_time_label, AuthTokens, Booking, BookingStatus, Identity, Service, Stylist,
        TimeSlot,
    },
    params::CreateBooking,
};

/// Longest appointment a single service may describe: one day.
const MAX_SERVICE_MINUTES: i64 = 24 * 60;

#[derive(Debug, Deserialize)]
pub struct WireService {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<WireService> for Service {
    type Error = BookingError;

    fn try_from(wire: WireService) -> Result<Self> {
        let what = format!("service {}", wire.id);
        let name = non_empty(wire.name)
            .ok_or_else(|| BookingError::invalid_response(&what).with_reason("missing name"))?;
        let duration = wire
            .duration
            .filter(|d| (1..=MAX_SERVICE_MINUTES).contains(d))
            .and_then(|d| u32::try_from(d).ok())
            .ok_or_else(|| {
                BookingError::invalid_response(&what)
                    .with_reason("duration must be between 1 and 1440 minutes")
            })?;
        let price = narrow_price(wire.price.unwrap_or(0.0))
            .ok_or_else(|| BookingError::invalid_response(&what).with_reason("invalid price"))?;

        Ok(Service {
            id: wire.id,
            name,
            category: wire.category.unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            duration,
            price,
            image: non_empty(wire.image_url),
            is_active: wire.is_active.unwrap_or(true),
        })
    }
}

/// Specialties arrive either as a list or as a comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireSpecialty {
    List(Vec<String>),
    Csv(String),
}

impl WireSpecialty {
    fn into_tags(self) -> Vec<String> {
        let tags = match self {
            WireSpecialty::List(tags) => tags,
            WireSpecialty::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        tags.into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct WireStylist {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specialty: Option<WireSpecialty>,
    #[serde(default, alias = "experience_years")]
    pub experience: Option<i64>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default, alias = "image", alias = "avatar_url")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl TryFrom<WireStylist> for Stylist {
    type Error = BookingError;

    fn try_from(wire: WireStylist) -> Result<Self> {
        let what = format!("stylist {}", wire.id);
        let name = non_empty(wire.name)
            .ok_or_else(|| BookingError::invalid_response(&what).with_reason("missing name"))?;
        let experience = match wire.experience {
            None => 0,
            Some(years) => u32::try_from(years).map_err(|_| {
                BookingError::invalid_response(&what).with_reason("negative experience")
            })?,
        };

        Ok(Stylist {
            id: wire.id,
            name,
            description: wire.description.unwrap_or_default(),
            specialty: wire.specialty.map(WireSpecialty::into_tags).unwrap_or_default(),
            experience,
            rating: wire.rating.filter(|r| r.is_finite()),
            avatar: non_empty(wire.avatar),
            is_active: wire.is_active.unwrap_or(true),
        })
    }
}

/// A slot is either `{"time": "09:00", "available": true}` or a bare label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireSlot {
    Detailed {
        time: String,
        #[serde(default = "default_true")]
        available: bool,
    },
    Label(String),
}

/// Slot lists arrive bare or wrapped in `{"slots": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireSlots {
    Bare(Vec<WireSlot>),
    Wrapped { slots: Vec<WireSlot> },
}

impl WireSlots {
    pub fn into_slots(self) -> Result<Vec<TimeSlot>> {
        let slots = match self {
            WireSlots::Bare(slots) | WireSlots::Wrapped { slots } => slots,
        };
        slots.into_iter().map(TimeSlot::try_from).collect()
    }
}

impl TryFrom<WireSlot> for TimeSlot {
    type Error = BookingError;

    fn try_from(wire: WireSlot) -> Result<Self> {
        let (label, available) = match wire {
            WireSlot::Detailed { time, available } => (time, available),
            WireSlot::Label(time) => (time, true),
        };
        let time = normalize_label(&label).ok_or_else(|| {
            BookingError::invalid_response("time slot").with_reason(format!("bad label '{label}'"))
        })?;
        Ok(TimeSlot { time, available })
    }
}

#[derive(Debug, Deserialize)]
pub struct WireBooking {
    pub id: u64,
    #[serde(default)]
    pub service_ids: Option<Vec<u64>>,
    #[serde(default)]
    pub service_id: Option<u64>,
    #[serde(default)]
    pub stylist_id: Option<u64>,
    #[serde(default, alias = "date")]
    pub booking_date: Option<String>,
    #[serde(default, alias = "time")]
    pub booking_time: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub total_duration: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WireBooking {
    /// Narrows a booking, filling fields the backend left out from the
    /// request that created it.
    pub fn narrow(self, request: Option<&CreateBooking>) -> Result<Booking> {
        let what = format!("booking {}", self.id);
        let invalid = |reason: &str| BookingError::invalid_response(&what).with_reason(reason);

        let service_ids = match (self.service_ids, self.service_id) {
            (Some(ids), _) if !ids.is_empty() => ids,
            (_, Some(id)) => vec![id],
            _ => request
                .map(|r| r.service_ids.clone())
                .ok_or_else(|| invalid("missing service ids"))?,
        };
        let stylist_id = self
            .stylist_id
            .or(request.map(|r| r.stylist_id))
            .ok_or_else(|| invalid("missing stylist id"))?;
        let date = match (self.booking_date.as_deref().map(parse_booking_date), request) {
            (Some(Some(date)), _) => date,
            (Some(None), Some(r)) => {
                warn!("Booking {}: unreadable date, keeping the requested one", self.id);
                r.date
            }
            (Some(None), None) => return Err(invalid("bad date")),
            (None, Some(r)) => r.date,
            (None, None) => return Err(invalid("missing date")),
        };
        let time = match (self.booking_time.as_deref().map(normalize_label), request) {
            (Some(Some(time)), _) => time,
            (Some(None), Some(r)) => {
                warn!("Booking {}: unreadable time, keeping the requested one", self.id);
                r.time.clone()
            }
            (Some(None), None) => return Err(invalid("bad time")),
            (None, Some(r)) => r.time.clone(),
            (None, None) => return Err(invalid("missing time")),
        };
        // A booking the backend just accepted must reach the confirmation,
        // so an unknown status only fails reads of existing bookings.
        let status = match self.status.as_deref().map(str::parse::<BookingStatus>) {
            None => BookingStatus::default(),
            Some(Ok(status)) => status,
            Some(Err(e)) if request.is_some() => {
                warn!("Booking {}: {e}, treating as pending", self.id);
                BookingStatus::default()
            }
            Some(Err(e)) => return Err(invalid(e.as_str())),
        };
        let created_at = self
            .created_at
            .and_then(|raw| raw.parse::<Timestamp>().ok());

        Ok(Booking {
            id: self.id,
            service_ids,
            stylist_id,
            date,
            time,
            customer_name: self
                .customer_name
                .or(request.map(|r| r.contact.name.clone()))
                .unwrap_or_default(),
            customer_phone: self
                .customer_phone
                .or(request.map(|r| r.contact.phone.clone()))
                .unwrap_or_default(),
            customer_email: non_empty(
                self.customer_email
                    .or(request.map(|r| r.contact.email.clone())),
            ),
            notes: non_empty(self.notes.or(request.map(|r| r.contact.notes.clone()))),
            status,
            total_price: self.total_price.and_then(narrow_price),
            total_duration: self.total_duration.and_then(|d| u32::try_from(d).ok()),
            created_at,
        })
    }
}

/// Body of `POST /api/v1/bookings`.
#[derive(Debug, Serialize)]
pub struct CreateBookingRequest<'a> {
    pub service_ids: &'a [u64],
    /// First selected service, for backends that only read a single id
    pub service_id: u64,
    pub stylist_id: u64,
    pub booking_date: String,
    pub booking_time: &'a str,
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub customer_email: &'a str,
    pub notes: &'a str,
}

impl<'a> From<&'a CreateBooking> for CreateBookingRequest<'a> {
    fn from(params: &'a CreateBooking) -> Self {
        CreateBookingRequest {
            service_ids: &params.service_ids,
            service_id: params.service_ids.first().copied().unwrap_or_default(),
            stylist_id: params.stylist_id,
            booking_date: params.date.to_string(),
            booking_time: &params.time,
            customer_name: params.contact.name.trim(),
            customer_phone: params.contact.phone.trim(),
            customer_email: params.contact.email.trim(),
            notes: &params.contact.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireIdentity {
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<WireIdentity> for Identity {
    type Error = BookingError;

    fn try_from(wire: WireIdentity) -> Result<Self> {
        let id = match wire.id {
            Value::String(s) if !s.is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(BookingError::invalid_response("identity").with_reason("missing id"))
            }
        };
        let email = non_empty(wire.email);
        let name = non_empty(wire.name)
            .or_else(|| email.clone())
            .unwrap_or_default();
        Ok(Identity {
            id,
            name,
            email,
            phone: non_empty(wire.phone),
            role: non_empty(wire.role),
        })
    }
}

/// The profile endpoint returns the user directly or as `{"user": {...}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireProfile {
    Wrapped { user: WireIdentity },
    Bare(WireIdentity),
}

impl WireProfile {
    pub fn into_identity(self) -> Result<Identity> {
        match self {
            WireProfile::Wrapped { user } | WireProfile::Bare(user) => user.try_into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WireTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Login responses carry tokens at the top level or under `tokens`.
#[derive(Debug, Deserialize)]
pub struct WireSignIn {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub tokens: Option<WireTokens>,
    #[serde(default)]
    pub user: Option<WireIdentity>,
}

impl WireSignIn {
    pub fn into_parts(self) -> Result<(AuthTokens, Option<Identity>)> {
        let tokens = match (self.tokens, self.access_token) {
            (Some(tokens), _) => AuthTokens {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
            },
            (None, Some(access_token)) => AuthTokens {
                access_token,
                refresh_token: self.refresh_token,
            },
            (None, None) => {
                return Err(
                    BookingError::invalid_response("sign-in").with_reason("missing access token")
                )
            }
        };
        let identity = self.user.map(Identity::try_from).transpose()?;
        Ok((tokens, identity))
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Error bodies: `{"error": "..."}`, `{"message": "..."}` or `{"detail": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct WireError {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl WireError {
    pub fn into_message(self) -> Option<String> {
        non_empty(self.error)
            .or_else(|| non_empty(self.message))
            .or_else(|| non_empty(self.detail))
    }
}

fn default_true() -> bool {
    true
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn narrow_price(price: f64) -> Option<u32> {
    if price.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&price) {
        Some(price.round() as u32)
    } else {
        None
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 datetime and keeps the date.
fn parse_booking_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    raw.get(..10).unwrap_or(raw).parse::<Date>().ok()
}

/// Normalizes `H:MM`, `HH:MM` and `HH:MM:SS` to `HH:MM`.
fn normalize_label(raw: &str) -> Option<String> {
    let time = parse_time_label(raw)?;
    Some(format!("{:02}:{:02}", time.hour(), time.minute()))
}
