//! Authentication gate in front of the booking wizard.

use log::info;

use super::{PendingBooking, Session, SessionStore};
use crate::{
    api::{BookingBackend, SignIn},
    error::Result,
    models::Identity,
};

/// Outcome of trying to enter the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Signed in; open the wizard, pre-selecting `preseed` once services load
    Ready {
        identity: Identity,
        preseed: Option<u64>,
    },
    /// No session; the deep-linked service (if any) was stashed
    SignInRequired { stashed: Option<u64> },
}

/// What to do after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resume {
    pub identity: Option<Identity>,
    /// Service the user was trying to book before the redirect
    pub service_id: Option<u64>,
}

/// Gatekeeper combining the session store with the pending-booking slot.
#[derive(Debug, Clone)]
pub struct AuthGate {
    store: SessionStore,
    pending: PendingBooking,
}

impl AuthGate {
    pub fn new(store: SessionStore, pending: PendingBooking) -> Self {
        Self { store, pending }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Checks for an authenticated identity before the wizard opens.
    ///
    /// Without one, `deep_link` is stashed so the wizard can resume with it
    /// after sign-in.
    pub async fn enter<B>(&self, backend: &B, deep_link: Option<u64>) -> Result<Entry>
    where
        B: BookingBackend + ?Sized,
    {
        match backend.current_identity().await? {
            Some(identity) => Ok(Entry::Ready {
                identity,
                preseed: deep_link,
            }),
            None => {
                if let Some(service_id) = deep_link {
                    self.pending.stash(service_id)?;
                }
                info!("Sign-in required before booking");
                Ok(Entry::SignInRequired { stashed: deep_link })
            }
        }
    }

    /// Persists a fresh session and consumes the pending marker.
    pub fn complete_sign_in(&self, sign_in: &SignIn) -> Result<Resume> {
        self.store.save(&Session::new(
            sign_in.tokens.clone(),
            sign_in.identity.clone(),
        ))?;
        let service_id = self.pending.take()?;
        if let Some(id) = service_id {
            info!("Resuming booking for service {id}");
        }
        Ok(Resume {
            identity: sign_in.identity.clone(),
            service_id,
        })
    }

    /// Drops the local session. Any pending marker is left alone.
    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()
    }
}
