//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation results get newtype wrappers so each context
//! can format them its own way. Everything renders as markdown, which the
//! CLI feeds through its terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Service, ...)  │───▶│ Result Types    │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Services, Stylists, TimeSlots, Bookings
//! - [`results`]: BookingConfirmation, CancelResult
//! - [`notice`]: Notice, one-line command feedback
//! - [`datetime`]: LocalDateTime, Money
//! - [`wizard`]: WizardView, the step-by-step summary
//!
//! ```rust
//! use salon_core::display::Notice;
//!
//! let notice = Notice::done("Signed in as Amy");
//! assert_eq!(format!("{notice}"), "Done: Signed in as Amy\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod notice;
pub mod results;
pub mod wizard;

pub use collections::{Bookings, Services, Stylists, TimeSlots};
pub use datetime::{LocalDateTime, Money};
pub use results::{BookingConfirmation, CancelResult};
pub use notice::{Notice, NoticeKind};
pub use wizard::WizardView;
