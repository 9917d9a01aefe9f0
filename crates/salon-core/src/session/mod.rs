//! Local session state and the sign-in hand-off.
//!
//! - [`SessionStore`]: tokens and identity persisted between invocations
//! - [`PendingBooking`]: single-key, time-bounded marker carrying a deep-linked
//!   service across the sign-in redirect
//! - [`AuthGate`]: decides whether the wizard may be entered and resumes it
//!   after sign-in

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{BookingError, Result},
    models::{AuthTokens, Identity},
};

pub mod gate;
pub mod pending;

pub use gate::{AuthGate, Entry, Resume};
pub use pending::PendingBooking;

/// File name of the persisted session inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// A signed-in session as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub tokens: AuthTokens,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    pub signed_in_at: Timestamp,
}

impl Session {
    pub fn new(tokens: AuthTokens, identity: Option<Identity>) -> Self {
        Self {
            tokens,
            identity,
            signed_in_at: Timestamp::now(),
        }
    }
}

/// JSON-file backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store whose file lives in `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the session, if any.
    ///
    /// A missing file is not an error. A file that no longer parses is
    /// discarded so the user is simply asked to sign in again.
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BookingError::FileSystem {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Discarding unreadable session file {}: {e}", self.path.display());
                self.clear()?;
                Ok(None)
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string_pretty(session)?;
        write_file(&self.path, &raw)?;
        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Replaces the tokens of the stored session, keeping its identity.
    pub fn update_tokens(&self, tokens: &AuthTokens) -> Result<()> {
        let session = match self.load()? {
            Some(mut session) => {
                session.tokens = tokens.clone();
                session
            }
            None => Session::new(tokens.clone(), None),
        };
        self.save(&session)
    }

    /// Removes the stored session. Clearing an absent session succeeds.
    pub fn clear(&self) -> Result<()> {
        remove_file(&self.path)
    }
}

pub(crate) fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BookingError::FileSystem {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, contents).map_err(|e| BookingError::FileSystem {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(BookingError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tokens(access: &str) -> AuthTokens {
        AuthTokens {
            access_token: access.to_string(),
            refresh_token: Some("refresh".to_string()),
        }
    }

    #[test]
    fn test_missing_session_loads_as_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(temp_dir.path());
        assert_eq!(store.load().unwrap(), None);
        store.clear().expect("Clearing an absent session should succeed");
    }

    #[test]
    fn test_update_tokens_keeps_identity() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(temp_dir.path());
        let identity = Identity {
            id: "7".to_string(),
            name: "Amy".to_string(),
            email: None,
            phone: Some("0912".to_string()),
            role: None,
        };
        store
            .save(&Session::new(tokens("old"), Some(identity.clone())))
            .unwrap();

        store.update_tokens(&tokens("new")).unwrap();

        let session = store.load().unwrap().expect("session should exist");
        assert_eq!(session.tokens.access_token, "new");
        assert_eq!(session.identity, Some(identity));
    }

    #[test]
    fn test_corrupt_session_is_discarded() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = SessionStore::new(temp_dir.path());
        fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }
}
