//! The four-step booking wizard.
//!
//! The wizard walks a customer through choosing services, a stylist, a slot
//! and finally contact details. It owns all of its state; every mutating
//! operation takes `&mut self`, so there is never more than one writer.
//!
//! ```text
//! ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐
//! │ 1. Services  │─▶│ 2. Stylist   │─▶│ 3. Slot      │─▶│ 4. Contact   │─▶ submit
//! │ ≥1 selected  │◀─│ one chosen   │◀─│ date + time  │◀─│ name, phone  │
//! └──────────────┘  └──────────────┘  └──────────────┘  └──────────────┘
//! ```
//!
//! Forward moves are guarded; backward moves are free and keep every
//! selection. Slot lists are re-fetched whenever the stylist, the date or the
//! set of services changes, and a response is only applied if it still
//! answers the wizard's current [`SlotQuery`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use salon_core::{wizard::BookingWizard, ClientConfigBuilder, HttpBackendBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfigBuilder::new().build()?;
//! let backend = HttpBackendBuilder::new(config).build()?;
//! let mut wizard = BookingWizard::new(&backend);
//!
//! wizard.load_catalog().await?;
//! wizard.toggle_service(1)?;
//! wizard.advance()?;
//! # Ok(())
//! # }
//! ```

use jiff::civil::Date;
use log::{debug, info, warn};

use crate::{
    api::BookingBackend,
    error::{BookingError, Result},
    models::{Booking, ContactInfo, Identity, Service, Stylist, TimeSlot},
    params::{CreateBooking, SlotQuery},
};

pub mod selection;
pub mod slots;


pub use selection::Selection;
pub use slots::{booking_window, mark_past_slots, Clock};

/// Message recorded when the catalogue cannot be fetched.
pub const LOAD_FAILURE: &str = "Failed to load services and stylists, please retry";

/// Message recorded when the slot list cannot be fetched.
pub const NO_SLOTS: &str = "No time slots available for this day, please pick another date";

/// Position in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    SelectingServices,
    SelectingStylist,
    SelectingSlot,
    EnteringContact,
}

impl Step {
    /// 1-based step number as shown to the user.
    pub fn number(self) -> u8 {
        match self {
            Step::SelectingServices => 1,
            Step::SelectingStylist => 2,
            Step::SelectingSlot => 3,
            Step::EnteringContact => 4,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::SelectingServices => Some(Step::SelectingStylist),
            Step::SelectingStylist => Some(Step::SelectingSlot),
            Step::SelectingSlot => Some(Step::EnteringContact),
            Step::EnteringContact => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::SelectingServices => None,
            Step::SelectingStylist => Some(Step::SelectingServices),
            Step::SelectingSlot => Some(Step::SelectingStylist),
            Step::EnteringContact => Some(Step::SelectingSlot),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::SelectingServices => "Select services",
            Step::SelectingStylist => "Select a stylist",
            Step::SelectingSlot => "Select a date and time",
            Step::EnteringContact => "Contact details",
        }
    }
}

/// Snapshot of everything the wizard shows.
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub step: Step,
    pub selection: Selection,
    /// Active services only
    pub services: Vec<Service>,
    /// Active stylists only
    pub stylists: Vec<Stylist>,
    /// Slots for `slot_query`, with past slots already marked unavailable
    pub slots: Vec<TimeSlot>,
    /// Query the current slot list answers
    pub slot_query: Option<SlotQuery>,
    pub loading: bool,
    pub submitting: bool,
    /// Last user-facing error, cleared by the next successful operation
    pub error: Option<String>,
}

/// Result of a successful submission; the wizard is done once this exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub booking_id: u64,
    pub booking: Booking,
}

/// Client-side booking state machine.
pub struct BookingWizard<B> {
    backend: B,
    clock: Clock,
    window_days: i32,
    preseed: Option<u64>,
    state: WizardState,
}

impl<B: BookingBackend> BookingWizard<B> {
    /// Creates an empty wizard at step 1.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            clock: Clock::System,
            window_days: 30,
            preseed: None,
            state: WizardState::default(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sets how many days past today a booking date may be.
    pub fn with_booking_window(mut self, days: i32) -> Self {
        self.window_days = days;
        self
    }

    /// Pre-seeds the contact form from the signed-in identity.
    pub fn with_identity(mut self, identity: &Identity) -> Self {
        self.state.selection.contact = ContactInfo::from(identity);
        self
    }

    /// Remembers a deep-linked service to select once the catalogue loads.
    pub fn with_preseed(mut self, service_id: Option<u64>) -> Self {
        self.preseed = service_id;
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn services(&self) -> &[Service] {
        &self.state.services
    }

    pub fn stylists(&self) -> &[Stylist] {
        &self.state.stylists
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.state.slots
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    pub fn total_price(&self) -> u32 {
        self.state.selection.total_price(&self.state.services)
    }

    pub fn total_duration(&self) -> u32 {
        self.state.selection.total_duration(&self.state.services)
    }

    /// Dates a booking may fall on, inclusive.
    pub fn date_range(&self) -> (Date, Date) {
        booking_window(self.clock.today(), self.window_days)
    }

    /// Fetches services and stylists, keeping only active ones.
    ///
    /// On failure the error is recorded for a retry prompt; nothing is
    /// retried automatically.
    pub async fn load_catalog(&mut self) -> Result<()> {
        self.state.loading = true;
        let fetched = async {
            let services = self.backend.list_services().await?;
            let stylists = self.backend.list_stylists().await?;
            Ok::<_, BookingError>((services, stylists))
        }
        .await;
        self.state.loading = false;

        let (services, stylists) = match fetched {
            Ok(lists) => lists,
            Err(e) => {
                warn!("Failed to load catalogue: {e}");
                self.state.error = Some(LOAD_FAILURE.to_string());
                return Err(e);
            }
        };

        self.state.services = services.into_iter().filter(|s| s.is_active).collect();
        self.state.stylists = stylists.into_iter().filter(|s| s.is_active).collect();
        self.state.error = None;
        debug!(
            "Loaded {} services and {} stylists",
            self.state.services.len(),
            self.state.stylists.len()
        );

        if let Some(service_id) = self.preseed.take() {
            self.preseed_service(service_id);
        }
        Ok(())
    }

    /// Selects a deep-linked service. Unknown or already selected ids are
    /// ignored. Returns whether the service ended up selected.
    pub fn preseed_service(&mut self, service_id: u64) -> bool {
        if !self.state.services.iter().any(|s| s.id == service_id) {
            debug!("Ignoring pre-seed for unknown service {service_id}");
            return false;
        }
        if !self.state.selection.has_service(service_id) {
            self.state.selection.toggle_service(service_id);
            self.invalidate_slots();
        }
        true
    }

    /// Adds or removes a service. Returns whether it is now selected.
    ///
    /// Only clears the slot list; [`Self::choose_service`] also re-fetches.
    pub fn toggle_service(&mut self, service_id: u64) -> Result<bool> {
        if !self.state.services.iter().any(|s| s.id == service_id) {
            return Err(BookingError::invalid_input("service")
                .with_reason(format!("no active service with ID {service_id}")));
        }
        let selected = self.state.selection.toggle_service(service_id);
        self.invalidate_slots();
        Ok(selected)
    }

    /// Chooses the stylist, replacing any earlier choice.
    ///
    /// Only clears the slot list; [`Self::choose_stylist`] also re-fetches.
    pub fn select_stylist(&mut self, stylist_id: u64) -> Result<()> {
        if !self.state.stylists.iter().any(|s| s.id == stylist_id) {
            return Err(BookingError::invalid_input("stylist")
                .with_reason(format!("no active stylist with ID {stylist_id}")));
        }
        if self.state.selection.stylist_id != Some(stylist_id) {
            self.state.selection.stylist_id = Some(stylist_id);
            self.invalidate_slots();
        }
        Ok(())
    }

    /// Chooses the date. Always clears the chosen time.
    ///
    /// Only clears the slot list; follow with [`Self::refresh_slots`] or use
    /// [`Self::choose_date`], which does both.
    pub fn select_date(&mut self, date: Date) -> Result<()> {
        let (first, last) = self.date_range();
        if date < first || date > last {
            return Err(BookingError::invalid_input("date")
                .with_reason(format!("{date} is outside {first} to {last}")));
        }
        self.state.selection.date = Some(date);
        self.state.selection.time = None;
        self.invalidate_slots();
        Ok(())
    }

    /// Toggles a service and fetches slots for the new total duration.
    pub async fn choose_service(&mut self, service_id: u64) -> Result<bool> {
        let selected = self.toggle_service(service_id)?;
        self.refresh_slots().await;
        Ok(selected)
    }

    /// Chooses the stylist and fetches their slots once a date is set.
    pub async fn choose_stylist(&mut self, stylist_id: u64) -> Result<()> {
        self.select_stylist(stylist_id)?;
        self.refresh_slots().await;
        Ok(())
    }

    /// Chooses the date and fetches availability for it.
    pub async fn choose_date(&mut self, date: Date) -> Result<()> {
        self.select_date(date)?;
        self.refresh_slots().await;
        Ok(())
    }

    /// Chooses a time, only if the current list has it marked available.
    /// Returns whether the selection changed hands to `label`.
    pub fn select_time(&mut self, label: &str) -> bool {
        let bookable = self
            .state
            .slots
            .iter()
            .any(|slot| slot.time == label && slot.available);
        if bookable {
            self.state.selection.time = Some(label.to_string());
        }
        bookable
    }

    /// Replaces the contact details.
    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.state.selection.contact = contact;
    }

    /// The availability question implied by the current selection, once
    /// stylist, date and at least one service are all set.
    pub fn slot_query(&self) -> Option<SlotQuery> {
        let selection = &self.state.selection;
        let stylist_id = selection.stylist_id?;
        let date = selection.date?;
        let duration = self.total_duration();
        if duration == 0 {
            return None;
        }
        Some(SlotQuery {
            stylist_id,
            date,
            duration,
        })
    }

    /// Fetches slots for the current selection.
    ///
    /// Failure leaves an empty list and a "no slots" message; there is no
    /// automatic retry.
    pub async fn refresh_slots(&mut self) {
        let Some(query) = self.slot_query() else {
            self.invalidate_slots();
            return;
        };
        let result = self.backend.available_slots(&query).await;
        self.apply_slots(&query, result);
    }

    /// Applies a slot response if it still answers the current question.
    ///
    /// Returns `false` when the response was stale and discarded.
    pub fn apply_slots(&mut self, query: &SlotQuery, result: Result<Vec<TimeSlot>>) -> bool {
        if self.slot_query().as_ref() != Some(query) {
            warn!("Discarding stale slots for stylist {} on {}", query.stylist_id, query.date);
            return false;
        }

        match result {
            Ok(mut slots) => {
                mark_past_slots(&mut slots, query.date, self.clock.now());
                self.state.error = if slots.iter().any(TimeSlot::is_available) {
                    None
                } else {
                    Some(NO_SLOTS.to_string())
                };
                self.state.slots = slots;
            }
            Err(e) => {
                warn!("Failed to fetch slots: {e}");
                self.state.slots.clear();
                self.state.error = Some(NO_SLOTS.to_string());
            }
        }
        self.state.slot_query = Some(*query);

        let still_bookable = self.state.selection.time.as_deref().is_some_and(|time| {
            self.state
                .slots
                .iter()
                .any(|slot| slot.time == time && slot.available)
        });
        if !still_bookable {
            self.state.selection.time = None;
        }
        true
    }

    /// Checks the guard for leaving the current step forwards.
    pub fn check_guard(&self) -> Result<()> {
        let selection = &self.state.selection;
        let step = self.state.step;
        match step {
            Step::SelectingServices if selection.service_ids.is_empty() => Err(
                BookingError::step_blocked(step, "Please select at least one service"),
            ),
            Step::SelectingStylist if selection.stylist_id.is_none() => {
                Err(BookingError::step_blocked(step, "Please select a stylist"))
            }
            Step::SelectingSlot if selection.date.is_none() || selection.time.is_none() => Err(
                BookingError::step_blocked(step, "Please select a date and time"),
            ),
            Step::EnteringContact => validate_contact(&selection.contact),
            _ => Ok(()),
        }
    }

    /// Moves forward one step if the guard holds.
    ///
    /// From the last step there is nowhere to go; use [`Self::submit`].
    pub fn advance(&mut self) -> Result<Step> {
        if let Err(e) = self.check_guard() {
            self.state.error = Some(e.user_message());
            return Err(e);
        }
        if let Some(next) = self.state.step.next() {
            debug!("Wizard step {} -> {}", self.state.step.number(), next.number());
            self.state.step = next;
        }
        self.state.error = None;
        Ok(self.state.step)
    }

    /// Moves back one step, keeping every selection. No-op at step 1.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.state.step.previous() {
            self.state.step = previous;
        }
        self.state.step
    }

    /// Validates the form and marks a submission as in flight.
    ///
    /// Nothing is sent when validation fails; the wizard stays on step 4.
    pub fn begin_submission(&mut self) -> Result<CreateBooking> {
        if self.state.submitting {
            return Err(BookingError::SubmissionInFlight);
        }
        if self.state.step != Step::EnteringContact {
            return Err(BookingError::step_blocked(
                self.state.step,
                "Please complete the previous steps first",
            ));
        }
        if let Err(e) = validate_contact(&self.state.selection.contact) {
            self.state.error = Some(e.user_message());
            return Err(e);
        }

        let selection = &self.state.selection;
        let (Some(stylist_id), Some(date), Some(time)) =
            (selection.stylist_id, selection.date, selection.time.clone())
        else {
            return Err(BookingError::step_blocked(
                Step::SelectingSlot,
                "Please select a date and time",
            ));
        };
        let request = CreateBooking {
            service_ids: selection.service_ids.clone(),
            stylist_id,
            date,
            time,
            contact: selection.contact.clone(),
        };

        self.state.submitting = true;
        self.state.error = None;
        Ok(request)
    }

    /// Clears the in-flight flag and records the outcome.
    pub fn finish_submission(&mut self, result: Result<Booking>) -> Result<Confirmation> {
        self.state.submitting = false;
        match result {
            Ok(booking) => {
                info!("Booking {} created", booking.id);
                Ok(Confirmation {
                    booking_id: booking.id,
                    booking,
                })
            }
            Err(e) => {
                warn!("Booking submission failed: {e}");
                self.state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Validates and sends the booking.
    pub async fn submit(&mut self) -> Result<Confirmation> {
        let request = self.begin_submission()?;
        let result = self.backend.create_booking(&request).await;
        self.finish_submission(result)
    }

    fn invalidate_slots(&mut self) {
        self.state.slots.clear();
        self.state.slot_query = None;
        self.state.selection.time = None;
    }
}

/// Required contact fields: a name and a phone number.
fn validate_contact(contact: &ContactInfo) -> Result<()> {
    if contact.name.trim().is_empty() {
        return Err(BookingError::step_blocked(
            Step::EnteringContact,
            "Please enter your name",
        ));
    }
    if contact.phone.trim().is_empty() {
        return Err(BookingError::step_blocked(
            Step::EnteringContact,
            "Please enter a phone number",
        ));
    }
    Ok(())
}
