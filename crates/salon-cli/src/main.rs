//! Salon CLI Application
//!
//! Terminal front-end for the salon booking backend.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use salon_core::{
    AppContext, AuthGate, ClientConfigBuilder, HttpBackendBuilder, PendingBooking, SessionStore,
};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        api_url,
        data_dir,
        no_color,
        command,
    } = Args::parse();

    let config = ClientConfigBuilder::new()
        .with_api_url(api_url)
        .with_data_dir(data_dir)
        .build()
        .context("Failed to resolve configuration")?;

    let store = SessionStore::new(&config.data_dir);
    let gate = AuthGate::new(
        store.clone(),
        PendingBooking::new(&config.data_dir, config.pending_ttl),
    );
    let backend = HttpBackendBuilder::new(config.clone())
        .with_session_store(store)
        .build()
        .context("Failed to initialize API client")?;
    let context = AppContext::initialize(config, &backend).await;
    let renderer = TerminalRenderer::new(!no_color);

    info!("Salon client started against {}", context.config.api_url);

    let cli = Cli::new(context, backend, gate, renderer);
    match command {
        Some(Services) | None => cli.list_services().await,
        Some(Stylists) => cli.list_stylists().await,
        Some(Slots(args)) => cli.show_slots(args).await,
        Some(Book(args)) => cli.book(args).await,
        Some(Login(args)) => cli.login(args).await,
        Some(Logout) => cli.logout().await,
        Some(Whoami) => {
            cli.whoami();
            Ok(())
        }
        Some(Bookings { command }) => cli.handle_booking_command(command).await,
        Some(Branding) => {
            cli.branding();
            Ok(())
        }
    }
}
