//! Client configuration and its builder.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use url::Url;

use crate::{
    error::{BookingError, Result},
    session::SESSION_FILE,
};

/// Environment variable consulted for the backend base URL.
pub const API_URL_ENV: &str = "SALON_API_URL";

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_PENDING_TTL: Duration = Duration::from_secs(10 * 60);
const DEFAULT_BOOKING_WINDOW_DAYS: i32 = 30;

/// Resolved configuration shared by the API client, session store and wizard.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the booking backend
    pub api_url: Url,
    /// Directory holding the session file and the pending-booking marker
    pub data_dir: PathBuf,
    /// Per-request timeout for backend calls
    pub request_timeout: Duration,
    /// How long a pending-booking marker survives a sign-in detour
    pub pending_ttl: Duration,
    /// How many days ahead of today a booking date may be
    pub booking_window_days: i32,
}

/// Builder for creating and configuring [`ClientConfig`] instances.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
    request_timeout: Option<Duration>,
    pending_ttl: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the backend base URL.
    ///
    /// If not specified, `$SALON_API_URL` is used, falling back to
    /// [`DEFAULT_API_URL`].
    pub fn with_api_url(mut self, url: Option<impl Into<String>>) -> Self {
        if let Some(url) = url {
            self.api_url = Some(url.into());
        }
        self
    }

    /// Sets a custom data directory.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/salon` or `~/.local/share/salon`
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.data_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_pending_ttl(mut self, ttl: Duration) -> Self {
        self.pending_ttl = Some(ttl);
        self
    }

    /// Builds the configuration, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Configuration` if the API URL does not parse
    /// Returns `BookingError::FileSystem` if the data directory cannot be created
    pub fn build(self) -> Result<ClientConfig> {
        let raw_url = match self.api_url {
            Some(url) => url,
            None => env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        };
        let api_url = Url::parse(&raw_url).map_err(|e| BookingError::Configuration {
            message: format!("Invalid API URL '{raw_url}': {e}"),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(BookingError::Configuration {
                message: format!("API URL must use http or https, got '{raw_url}'"),
            });
        }

        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => Self::default_data_dir()?,
        };
        std::fs::create_dir_all(&data_dir).map_err(|e| BookingError::FileSystem {
            path: data_dir.clone(),
            source: e,
        })?;

        Ok(ClientConfig {
            api_url,
            data_dir,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_TIMEOUT),
            pending_ttl: self.pending_ttl.unwrap_or(DEFAULT_PENDING_TTL),
            booking_window_days: DEFAULT_BOOKING_WINDOW_DAYS,
        })
    }

    /// Returns the default data directory following XDG Base Directory
    /// specification.
    fn default_data_dir() -> Result<PathBuf> {
        let session_file = xdg::BaseDirectories::with_prefix("salon")
            .place_data_file(SESSION_FILE)
            .map_err(|e| BookingError::XdgDirectory(e.to_string()))?;
        session_file
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| BookingError::XdgDirectory("data directory has no parent".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_values_win() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config = ClientConfigBuilder::new()
            .with_api_url(Some("https://api.example.com"))
            .with_data_dir(Some(temp_dir.path().join("salon")))
            .with_pending_ttl(Duration::from_secs(30))
            .build()
            .expect("Failed to build config");

        assert_eq!(config.api_url.as_str(), "https://api.example.com/");
        assert!(config.data_dir.exists());
        assert_eq!(config.pending_ttl, Duration::from_secs(30));
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.booking_window_days, 30);
    }

    #[test]
    fn test_rejects_non_http_url() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = ClientConfigBuilder::new()
            .with_api_url(Some("ftp://example.com"))
            .with_data_dir(Some(temp_dir.path()))
            .build()
            .unwrap_err();
        assert!(matches!(err, BookingError::Configuration { .. }));
    }

    #[test]
    fn test_rejects_garbage_url() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = ClientConfigBuilder::new()
            .with_api_url(Some("not a url"))
            .with_data_dir(Some(temp_dir.path()))
            .build();
        assert!(result.is_err());
    }
}
