//! The user's in-progress choices.

use jiff::civil::Date;

use crate::models::{ContactInfo, Service};

/// Everything the user has picked so far.
///
/// Service ids keep insertion order, which is also the display order and the
/// order they are submitted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub(crate) service_ids: Vec<u64>,
    pub(crate) stylist_id: Option<u64>,
    pub(crate) date: Option<Date>,
    pub(crate) time: Option<String>,
    pub(crate) contact: ContactInfo,
}

impl Selection {
    pub fn service_ids(&self) -> &[u64] {
        &self.service_ids
    }

    pub fn stylist_id(&self) -> Option<u64> {
        self.stylist_id
    }

    pub fn date(&self) -> Option<Date> {
        self.date
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn has_service(&self, id: u64) -> bool {
        self.service_ids.contains(&id)
    }

    /// Adds `id` if absent, removes it otherwise. Returns whether it is now
    /// selected.
    pub(crate) fn toggle_service(&mut self, id: u64) -> bool {
        if let Some(pos) = self.service_ids.iter().position(|s| *s == id) {
            self.service_ids.remove(pos);
            false
        } else {
            self.service_ids.push(id);
            true
        }
    }

    /// Selected services resolved against `catalog`, in selection order.
    pub fn services<'a>(&self, catalog: &'a [Service]) -> Vec<&'a Service> {
        self.service_ids
            .iter()
            .filter_map(|id| catalog.iter().find(|s| s.id == *id))
            .collect()
    }

    /// Sum of the selected services' prices, saturating at `u32::MAX`.
    pub fn total_price(&self, catalog: &[Service]) -> u32 {
        self.services(catalog)
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.price))
    }

    /// Sum of the selected services' durations in minutes, saturating at
    /// `u32::MAX`.
    pub fn total_duration(&self, catalog: &[Service]) -> u32 {
        self.services(catalog)
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.duration))
    }
}
