//! Core library for the salon booking client.
//!
//! This crate holds everything the terminal front-end needs to take a
//! customer from "which service?" to a confirmed booking: typed models, an
//! HTTP client for the booking backend, the local session store and the
//! four-step booking wizard.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Collections, results and the wizard
//!   view
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use salon_core::{
//!     wizard::BookingWizard, ClientConfigBuilder, ContactInfo, HttpBackendBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfigBuilder::new()
//!     .with_api_url(Some("https://salon.example.com"))
//!     .build()?;
//! let backend = HttpBackendBuilder::new(config).build()?;
//!
//! let mut wizard = BookingWizard::new(&backend);
//! wizard.load_catalog().await?;
//! wizard.toggle_service(1)?;
//! wizard.advance()?;
//! wizard.select_stylist(4)?;
//! wizard.advance()?;
//! wizard.select_date(jiff::civil::date(2026, 10, 20))?;
//! wizard.refresh_slots().await;
//! wizard.select_time("18:30");
//! wizard.advance()?;
//! wizard.set_contact(ContactInfo {
//!     name: "Amy".to_string(),
//!     phone: "0912345678".to_string(),
//!     ..ContactInfo::default()
//! });
//! let confirmation = wizard.submit().await?;
//! println!("Booked: {}", confirmation.booking_id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod session;
pub mod wizard;

// Re-export commonly used types
pub use api::{BookingBackend, HttpBackend, HttpBackendBuilder, SignIn};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use context::AppContext;
pub use display::{
    BookingConfirmation, Bookings, CancelResult, Notice, Services, Stylists, TimeSlots, WizardView,
};
pub use error::{BookingError, Result};
pub use models::{
    AuthTokens, Booking, BookingStatus, Branding, ContactInfo, Identity, Service, Stylist,
    TimeSlot,
};
pub use params::{CreateBooking, Credentials, Id, SlotQuery};
pub use session::{AuthGate, Entry, PendingBooking, Resume, SessionStore};
pub use wizard::{BookingWizard, Confirmation, Step};
