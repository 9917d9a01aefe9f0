use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{BookArgs, BookingCommands, LoginArgs, SlotsArgs};

/// Terminal booking client for the salon
///
/// Browse services and stylists, check a stylist's free slots and book an
/// appointment against the salon's booking backend. Sessions are kept in
/// the data directory between runs.
#[derive(Parser)]
#[command(version, about, name = "salon")]
pub struct Args {
    /// Base URL of the booking backend. Defaults to $SALON_API_URL, then
    /// http://localhost:8080
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory for the session and pending-booking files. Defaults to
    /// $XDG_DATA_HOME/salon
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the salon CLI
///
/// Without a command the service catalogue is listed.
#[derive(Subcommand)]
pub enum Commands {
    /// List bookable services
    #[command(alias = "sv")]
    Services,
    /// List stylists
    #[command(alias = "st")]
    Stylists,
    /// Show a stylist's time slots for a date
    Slots(SlotsArgs),
    /// Book an appointment, going as far as the given flags allow
    #[command(alias = "b")]
    Book(BookArgs),
    /// Sign in with email and password
    Login(LoginArgs),
    /// Forget the local session
    Logout,
    /// Show the signed-in customer
    Whoami,
    /// Manage your bookings
    Bookings {
        #[command(subcommand)]
        command: BookingCommands,
    },
    /// Show the salon's branding settings
    Branding,
}
