//! Pending-booking hand-off across the sign-in redirect.
//!
//! Exactly one marker exists at a time. The redirect to sign-in produces it,
//! the post-sign-in resume consumes it, and it is never read twice.

use std::{fs, path::{Path, PathBuf}, time::Duration};

use jiff::Timestamp;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{remove_file, write_file};
use crate::error::{BookingError, Result};

const PENDING_FILE: &str = "pending_booking.json";

#[derive(Debug, Serialize, Deserialize)]
struct Marker {
    service_id: u64,
    created_at: Timestamp,
}

/// Time-bounded, consume-once slot recording which service the user meant
/// to book before being sent to sign in.
#[derive(Debug, Clone)]
pub struct PendingBooking {
    path: PathBuf,
    ttl: Duration,
}

impl PendingBooking {
    pub fn new(data_dir: &Path, ttl: Duration) -> Self {
        Self {
            path: data_dir.join(PENDING_FILE),
            ttl,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records `service_id`, replacing any earlier marker.
    pub fn stash(&self, service_id: u64) -> Result<()> {
        self.stash_at(service_id, Timestamp::now())
    }

    pub fn stash_at(&self, service_id: u64, now: Timestamp) -> Result<()> {
        let marker = Marker {
            service_id,
            created_at: now,
        };
        write_file(&self.path, &serde_json::to_string(&marker)?)?;
        debug!("Stashed pending booking for service {service_id}");
        Ok(())
    }

    /// Consumes the marker.
    ///
    /// The marker is removed whether or not it is still valid; an expired or
    /// unreadable marker yields `None`.
    pub fn take(&self) -> Result<Option<u64>> {
        self.take_at(Timestamp::now())
    }

    pub fn take_at(&self, now: Timestamp) -> Result<Option<u64>> {
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
        remove_file(&self.path)?;

        let marker: Marker = match serde_json::from_str(&raw) {
            Ok(marker) => marker,
            Err(e) => {
                warn!("Ignoring unreadable pending booking marker: {e}");
                return Ok(None);
            }
        };

        let age_ms = now.as_millisecond() - marker.created_at.as_millisecond();
        let ttl_ms = i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX);
        if age_ms > ttl_ms {
            warn!(
                "Pending booking for service {} expired after {}s",
                marker.service_id,
                age_ms / 1000
            );
            return Ok(None);
        }
        Ok(Some(marker.service_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::ToSpan;
    use tempfile::TempDir;

    fn pending(temp_dir: &TempDir) -> PendingBooking {
        PendingBooking::new(temp_dir.path(), Duration::from_secs(600))
    }

    #[test]
    fn test_marker_is_consumed_once() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pending = pending(&temp_dir);

        pending.stash(5).unwrap();
        assert_eq!(pending.take().unwrap(), Some(5));
        assert_eq!(pending.take().unwrap(), None);
        assert!(!pending.path().exists());
    }

    #[test]
    fn test_later_stash_replaces_earlier() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pending = pending(&temp_dir);

        pending.stash(1).unwrap();
        pending.stash(2).unwrap();
        assert_eq!(pending.take().unwrap(), Some(2));
    }

    #[test]
    fn test_expired_marker_is_dropped() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pending = pending(&temp_dir);
        let stashed_at = Timestamp::now();

        pending.stash_at(5, stashed_at).unwrap();
        let later = stashed_at.checked_add(11.minutes()).unwrap();

        assert_eq!(pending.take_at(later).unwrap(), None);
        assert!(!pending.path().exists());
    }

    #[test]
    fn test_marker_within_ttl_survives() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pending = pending(&temp_dir);
        let stashed_at = Timestamp::now();

        pending.stash_at(8, stashed_at).unwrap();
        let later = stashed_at.checked_add(9.minutes()).unwrap();

        assert_eq!(pending.take_at(later).unwrap(), Some(8));
    }
}
