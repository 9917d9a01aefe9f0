//! Backend collaborator contracts and the HTTP implementation.
//!
//! The wizard only ever talks to the [`BookingBackend`] trait, so tests can
//! drive it with an in-memory fake while the CLI uses [`HttpBackend`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  BookingWizard  │───▶│ BookingBackend  │───▶│   HttpBackend   │
//! │  (state machine)│    │    (trait)      │    │ (reqwest, JSON) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Booking, Identity, Service, Stylist, TimeSlot},
    params::{CreateBooking, SlotQuery},
};

pub mod http;
pub mod wire;

pub use http::{HttpBackend, HttpBackendBuilder, SignIn};

/// The read and write operations the booking wizard needs from the backend.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// All services, including inactive ones.
    async fn list_services(&self) -> Result<Vec<Service>>;

    /// All stylists, including inactive ones.
    async fn list_stylists(&self) -> Result<Vec<Stylist>>;

    /// Slots for one stylist on one date, sized for `query.duration` minutes.
    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<TimeSlot>>;

    /// Creates a booking; rejections carry the server's message.
    async fn create_booking(&self, request: &CreateBooking) -> Result<Booking>;

    /// The signed-in identity, or `None` when there is no valid session.
    async fn current_identity(&self) -> Result<Option<Identity>>;
}

#[async_trait]
impl<T: BookingBackend + ?Sized> BookingBackend for &T {
    async fn list_services(&self) -> Result<Vec<Service>> {
        (**self).list_services().await
    }

    async fn list_stylists(&self) -> Result<Vec<Stylist>> {
        (**self).list_stylists().await
    }

    async fn available_slots(&self, query: &SlotQuery) -> Result<Vec<TimeSlot>> {
        (**self).available_slots(query).await
    }

    async fn create_booking(&self, request: &CreateBooking) -> Result<Booking> {
        (**self).create_booking(request).await
    }

    async fn current_identity(&self) -> Result<Option<Identity>> {
        (**self).current_identity().await
    }
}
