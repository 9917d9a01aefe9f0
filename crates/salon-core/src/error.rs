//! Error types for the booking client library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::wizard::Step;

/// Fallback shown when the backend rejects a booking without saying why.
pub const GENERIC_SUBMIT_FAILURE: &str = "Booking failed, please try again later";

/// Comprehensive error type for all booking client operations.
#[derive(Error, Debug)]
pub enum BookingError {
    /// A wizard step guard is unmet; never sent to the network
    #[error("{prompt}")]
    StepBlocked { step: Step, prompt: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Transport-level failure talking to the backend
    #[error("Request failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// No valid session, or the session could not be refreshed
    #[error("Sign-in required")]
    Unauthorized,
    /// A response body did not match the expected contract
    #[error("Invalid {what} in response: {reason}")]
    InvalidResponse { what: String, reason: String },
    /// Another submission is still outstanding
    #[error("A booking submission is already in progress")]
    SubmissionInFlight,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BookingError {
        BookingError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for errors raised while narrowing backend responses.
pub struct InvalidResponseBuilder {
    what: String,
}

impl InvalidResponseBuilder {
    pub fn new(what: impl Into<String>) -> Self {
        Self { what: what.into() }
    }

    pub fn with_reason(self, reason: impl Into<String>) -> BookingError {
        BookingError::InvalidResponse {
            what: self.what,
            reason: reason.into(),
        }
    }
}

impl BookingError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a builder for response contract violations.
    pub fn invalid_response(what: impl Into<String>) -> InvalidResponseBuilder {
        InvalidResponseBuilder::new(what)
    }

    /// Creates a blocked-step error with the prompt to show inline.
    pub fn step_blocked(step: Step, prompt: impl Into<String>) -> Self {
        BookingError::StepBlocked {
            step,
            prompt: prompt.into(),
        }
    }

    /// Message suitable for showing to the user after a failed submission.
    ///
    /// Server rejections are surfaced verbatim; anything else falls back to
    /// [`GENERIC_SUBMIT_FAILURE`].
    pub fn user_message(&self) -> String {
        match self {
            BookingError::Rejected { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            BookingError::StepBlocked { prompt, .. } => prompt.clone(),
            BookingError::InvalidInput { .. }
            | BookingError::Unauthorized
            | BookingError::SubmissionInFlight => self.to_string(),
            _ => GENERIC_SUBMIT_FAILURE.to_string(),
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to BookingError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| BookingError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Result type alias for booking client operations
pub type Result<T> = std::result::Result<T, BookingError>;
