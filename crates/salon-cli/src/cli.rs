//! Command handlers and their clap argument wrappers.
//!
//! Argument structs carry the clap derives and convert into salon-core
//! parameter types with `From`, so core params stay free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → HttpBackend / BookingWizard
//! ```
//!
//! [`Cli`] owns the backend and the session gate and renders every result
//! through the [`TerminalRenderer`].

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use jiff::civil::Date;
use log::debug;
use salon_core::{
    display::{Bookings, Notice, Services, Stylists, TimeSlots},
    params::{Credentials, Id},
    wizard::BookingWizard,
    AppContext, AuthGate, BookingBackend, BookingConfirmation, CancelResult, ContactInfo, Entry,
    HttpBackend, Identity, Step, WizardView,
};

use crate::renderer::TerminalRenderer;

// ============================================================================
// CLI Argument Wrappers
// ============================================================================

/// Show a stylist's time slots for a date
///
/// Slots are sized for the combined duration of the given services. Times
/// that have already passed today are shown as unavailable.
#[derive(Args)]
pub struct SlotsArgs {
    /// ID of the stylist
    #[arg(long)]
    pub stylist: u64,
    /// Date in YYYY-MM-DD form
    #[arg(long)]
    pub date: Date,
    /// Service IDs as a comma-separated list
    #[arg(long, value_delimiter = ',', required = true)]
    pub service: Vec<u64>,
}

/// Book an appointment
///
/// Each flag answers one wizard step. The wizard stops at the first step
/// whose answer is missing and shows what it still needs, so running
/// `salon book --service 1` prints the stylists to choose from next.
#[derive(Args, Default)]
pub struct BookArgs {
    /// Service IDs as a comma-separated list
    #[arg(long, value_delimiter = ',')]
    pub service: Vec<u64>,
    /// ID of the stylist
    #[arg(long)]
    pub stylist: Option<u64>,
    /// Date in YYYY-MM-DD form
    #[arg(long)]
    pub date: Option<Date>,
    /// Start time in HH:MM form
    #[arg(long)]
    pub time: Option<String>,
    /// Name for the booking. Defaults to the signed-in customer's name
    #[arg(long)]
    pub name: Option<String>,
    /// Phone number. Defaults to the signed-in customer's phone
    #[arg(long)]
    pub phone: Option<String>,
    /// Email address
    #[arg(long)]
    pub email: Option<String>,
    /// Notes for the stylist
    #[arg(long)]
    pub notes: Option<String>,
}

impl BookArgs {
    /// The service a sign-in detour should come back to.
    pub fn deep_link(&self) -> Option<u64> {
        self.service.first().copied()
    }

    /// Overlays the contact flags on a pre-filled form.
    pub fn contact_over(&self, base: ContactInfo) -> ContactInfo {
        ContactInfo {
            name: self.name.clone().unwrap_or(base.name),
            phone: self.phone.clone().unwrap_or(base.phone),
            email: self.email.clone().unwrap_or(base.email),
            notes: self.notes.clone().unwrap_or(base.notes),
        }
    }

    fn has_contact_flags(&self) -> bool {
        self.name.is_some() || self.phone.is_some() || self.email.is_some() || self.notes.is_some()
    }
}

/// Sign in with email and password
#[derive(Args)]
pub struct LoginArgs {
    /// Account email address
    #[arg(long)]
    pub email: String,
    /// Account password
    #[arg(long)]
    pub password: String,
}

impl From<LoginArgs> for Credentials {
    fn from(val: LoginArgs) -> Self {
        Credentials {
            email: val.email,
            password: val.password,
        }
    }
}

/// Show one booking
#[derive(Args)]
pub struct ShowBookingArgs {
    #[arg(help = "ID of the booking to show")]
    pub id: u64,
}

impl From<ShowBookingArgs> for Id {
    fn from(val: ShowBookingArgs) -> Self {
        Id { id: val.id }
    }
}

/// Cancel a booking
#[derive(Args)]
pub struct CancelBookingArgs {
    #[arg(help = "ID of the booking to cancel")]
    pub id: u64,
}

impl From<CancelBookingArgs> for Id {
    fn from(val: CancelBookingArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// List your bookings
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show details of a booking
    #[command(alias = "s")]
    Show(ShowBookingArgs),
    /// Cancel a booking
    #[command(alias = "c")]
    Cancel(CancelBookingArgs),
}

// ============================================================================
// Command Dispatcher
// ============================================================================

pub struct Cli {
    context: AppContext,
    backend: HttpBackend,
    gate: AuthGate,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(
        context: AppContext,
        backend: HttpBackend,
        gate: AuthGate,
        renderer: TerminalRenderer,
    ) -> Self {
        Self {
            context,
            backend,
            gate,
            renderer,
        }
    }

    fn wizard(&self) -> BookingWizard<&HttpBackend> {
        BookingWizard::new(&self.backend)
            .with_booking_window(self.context.config.booking_window_days)
    }

    pub async fn list_services(&self) -> Result<()> {
        let services = self
            .backend
            .list_services()
            .await
            .context("Failed to load services")?;
        let active = services.into_iter().filter(|s| s.is_active).collect();
        self.renderer.render(&Services(active));
        Ok(())
    }

    pub async fn list_stylists(&self) -> Result<()> {
        let stylists = self
            .backend
            .list_stylists()
            .await
            .context("Failed to load stylists")?;
        let active = stylists.into_iter().filter(|s| s.is_active).collect();
        self.renderer.render(&Stylists(active));
        Ok(())
    }

    pub async fn show_slots(&self, args: SlotsArgs) -> Result<()> {
        let mut wizard = self.wizard();
        wizard
            .load_catalog()
            .await
            .context("Failed to load services and stylists")?;
        for id in &args.service {
            wizard.toggle_service(*id)?;
        }
        wizard.select_stylist(args.stylist)?;
        wizard.choose_date(args.date).await?;

        let stylist = wizard
            .stylists()
            .iter()
            .find(|s| s.id == args.stylist)
            .map_or_else(|| format!("#{}", args.stylist), |s| s.name.clone());
        let header = format!(
            "# {stylist} on {} ({} min)\n\n",
            args.date,
            wizard.total_duration()
        );
        self.renderer.render(&header);
        self.renderer.render(&TimeSlots(wizard.slots()));
        Ok(())
    }

    /// Runs the wizard as far as the flags allow.
    pub async fn book(&self, args: BookArgs) -> Result<()> {
        match self.gate.enter(&self.backend, args.deep_link()).await? {
            Entry::SignInRequired { stashed } => {
                self.renderer.render(
                    &Notice::sign_in_required(stashed)
                        .with_next("salon login --email <EMAIL> --password <PASSWORD>"),
                );
                Ok(())
            }
            Entry::Ready { identity, preseed } => self.run_wizard(&identity, preseed, &args).await,
        }
    }

    async fn run_wizard(
        &self,
        identity: &Identity,
        preseed: Option<u64>,
        args: &BookArgs,
    ) -> Result<()> {
        let mut wizard = self.wizard().with_identity(identity).with_preseed(preseed);
        wizard
            .load_catalog()
            .await
            .context("Failed to load services and stylists")?;
        self.renderer
            .render(&format!("# {}\n\n", self.context.branding.name));

        for id in &args.service {
            if !wizard.selection().has_service(*id) {
                wizard.toggle_service(*id)?;
            }
        }
        if wizard.advance().is_err() {
            self.show_wizard(&wizard);
            return Ok(());
        }

        if let Some(stylist) = args.stylist {
            wizard.select_stylist(stylist)?;
        }
        if wizard.advance().is_err() {
            self.show_wizard(&wizard);
            return Ok(());
        }

        if let Some(date) = args.date {
            wizard.choose_date(date).await?;
        }
        if let Some(time) = &args.time {
            if !wizard.select_time(time) {
                self.renderer.render(&Notice::slot_unavailable(time));
            }
        }
        if wizard.advance().is_err() {
            self.show_wizard(&wizard);
            return Ok(());
        }

        if args.has_contact_flags() {
            let contact = args.contact_over(wizard.selection().contact().clone());
            wizard.set_contact(contact);
        }
        debug!("Submitting booking for {}", identity.name);
        match wizard.submit().await {
            Ok(confirmation) => {
                self.renderer.render(&BookingConfirmation(&confirmation));
                Ok(())
            }
            Err(e) => {
                self.show_wizard(&wizard);
                Err(anyhow!(e.user_message()))
            }
        }
    }

    /// Prints the wizard's state plus the choices for the step it is on.
    fn show_wizard(&self, wizard: &BookingWizard<&HttpBackend>) {
        self.renderer.render(&WizardView(wizard.state()));
        match wizard.step() {
            Step::SelectingServices => {
                println!();
                self.renderer.render(&Services(wizard.services().to_vec()));
            }
            Step::SelectingStylist => {
                println!();
                self.renderer.render(&Stylists(wizard.stylists().to_vec()));
            }
            Step::SelectingSlot | Step::EnteringContact => {}
        }
    }

    pub async fn login(&self, args: LoginArgs) -> Result<()> {
        let sign_in = self
            .backend
            .login(&args.into())
            .await
            .context("Sign-in failed")?;
        let resume = self.gate.complete_sign_in(&sign_in)?;

        let identity = match resume.identity {
            Some(identity) => identity,
            None => self
                .backend
                .current_identity()
                .await?
                .ok_or_else(|| anyhow!("Signed in, but the profile could not be loaded"))?,
        };
        self.renderer
            .render(&Notice::done(format!("Signed in as {}", identity.name)));

        if let Some(service_id) = resume.service_id {
            println!();
            let args = BookArgs {
                service: vec![service_id],
                ..BookArgs::default()
            };
            self.run_wizard(&identity, Some(service_id), &args).await?;
        }
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        self.backend.logout().await;
        self.gate.sign_out()?;
        self.renderer.render(&Notice::done("Signed out"));
        Ok(())
    }

    pub fn whoami(&self) {
        match &self.context.identity {
            Some(identity) => self.renderer.render(identity),
            None => self.renderer.render(&Notice::warning("Not signed in")),
        }
    }

    pub fn branding(&self) {
        self.renderer.render(&self.context.branding);
    }

    pub async fn handle_booking_command(&self, command: BookingCommands) -> Result<()> {
        if !self.backend.has_session().await {
            bail!("Sign-in required. Run `salon login` first.");
        }
        match command {
            BookingCommands::List => {
                let bookings = self
                    .backend
                    .list_bookings()
                    .await
                    .context("Failed to load bookings")?;
                self.renderer.render(&Bookings(bookings));
            }
            BookingCommands::Show(args) => {
                let booking = self.backend.get_booking(&args.into()).await?;
                self.renderer.render(&booking);
            }
            BookingCommands::Cancel(args) => {
                let booking = self.backend.cancel_booking(&args.into()).await?;
                self.renderer.render(&CancelResult(booking));
            }
        }
        Ok(())
    }
}
