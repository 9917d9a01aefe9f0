//! Data models for the booking client.
//!
//! These are the narrowed domain types the rest of the crate works with.
//! Backend responses arrive as loose wire shapes (see [`crate::api::wire`])
//! and are converted into these models only after validation, so code that
//! holds a [`Service`] can rely on it having a name and a non-zero duration.
//!
//! Display implementations live in [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use salon_core::models::{Service, TimeSlot};
//!
//! let cut = Service {
//!     id: 1,
//!     name: "Haircut".to_string(),
//!     category: "hair".to_string(),
//!     description: "Wash, cut and style".to_string(),
//!     duration: 60,
//!     price: 800,
//!     image: None,
//!     is_active: true,
//! };
//! assert!(format!("{cut}").contains("Haircut"));
//!
//! let slot = TimeSlot::available("17:30");
//! assert!(slot.is_available());
//! ```

pub mod booking;
pub mod branding;
pub mod identity;
pub mod service;
pub mod slot;
pub mod stylist;


pub use booking::{Booking, BookingStatus};
pub use branding::Branding;
pub use identity::{AuthTokens, ContactInfo, Identity};
pub use service::Service;
pub use slot::TimeSlot;
pub use stylist::Stylist;
