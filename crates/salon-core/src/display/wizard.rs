//! Step-by-step rendering of the booking wizard.

use std::fmt;

use super::{collections::TimeSlots, datetime::Money};
use crate::wizard::{Step, WizardState};

/// Markdown view of a wizard snapshot: the current step, the pieces chosen
/// so far, and the running totals.
pub struct WizardView<'a>(pub &'a WizardState);

impl<'a> fmt::Display for WizardView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let selection = &state.selection;

        writeln!(f, "# {}", state.step)?;
        writeln!(f)?;
        if let Some(error) = &state.error {
            writeln!(f, "> {error}")?;
            writeln!(f)?;
        }

        let chosen = selection.services(&state.services);
        if chosen.is_empty() {
            writeln!(f, "- Services: none selected")?;
        } else {
            let names: Vec<&str> = chosen.iter().map(|s| s.name.as_str()).collect();
            writeln!(f, "- Services: {}", names.join(", "))?;
        }

        if let Some(stylist) = selection
            .stylist_id()
            .and_then(|id| state.stylists.iter().find(|s| s.id == id))
        {
            writeln!(f, "- Stylist: {}", stylist.name)?;
        }
        match (selection.date(), selection.time()) {
            (Some(date), Some(time)) => writeln!(f, "- When: {date} {time}")?,
            (Some(date), None) => writeln!(f, "- Date: {date}")?,
            _ => {}
        }
        let contact = selection.contact();
        if !contact.name.is_empty() {
            writeln!(f, "- Name: {}", contact.name)?;
        }
        if !contact.phone.is_empty() {
            writeln!(f, "- Phone: {}", contact.phone)?;
        }

        writeln!(
            f,
            "- Total: {} / {} min",
            Money(selection.total_price(&state.services)),
            selection.total_duration(&state.services)
        )?;

        if state.step == Step::SelectingSlot && state.slot_query.is_some() {
            writeln!(f)?;
            writeln!(f, "## Time slots")?;
            writeln!(f)?;
            write!(f, "{}", TimeSlots(&state.slots))?;
        }
        Ok(())
    }
}
