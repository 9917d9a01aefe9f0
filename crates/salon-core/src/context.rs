//! Start-up context shared by every command.

use log::{debug, warn};

use crate::{
    api::{BookingBackend, HttpBackend},
    config::ClientConfig,
    models::{Branding, Identity},
};

/// Configuration, branding and identity resolved once per run.
///
/// Consumers receive it by reference; nothing in it changes after
/// [`AppContext::initialize`] returns.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub branding: Branding,
    pub identity: Option<Identity>,
}

impl AppContext {
    /// Fetches branding and the signed-in identity.
    ///
    /// Branding falls back to [`Branding::default`] when the settings
    /// endpoint fails. An identity that cannot be fetched is treated as
    /// signed out; [`crate::AuthGate::enter`] re-checks before booking.
    pub async fn initialize(config: ClientConfig, backend: &HttpBackend) -> Self {
        let branding = match backend.branding().await {
            Ok(branding) => branding,
            Err(e) => {
                warn!("Using default branding: {e}");
                Branding::default()
            }
        };
        let identity = match backend.current_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Could not load profile: {e}");
                None
            }
        };
        debug!(
            "Context ready for {} ({})",
            branding.name,
            identity.as_ref().map_or("signed out", |i| i.name.as_str())
        );
        Self {
            config,
            branding,
            identity,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }
}
