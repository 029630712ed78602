//! In-band stream failures.
//!
//! A `StreamError` is raised when the producer itself reports a failure with
//! an error frame. It is distinct from a transport fault: the connection was
//! fine, the generation was not.

use thiserror::Error;

/// Message used when an error frame carries no message of its own.
pub const GENERIC_STREAM_ERROR: &str = "Error during token stream.";

/// Failure reported by the producer through an error frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StreamError {
    /// The producer's message, or [`GENERIC_STREAM_ERROR`].
    pub message: String,
    /// Whether the message came from the producer rather than the fallback.
    pub from_producer: bool,
}

impl StreamError {
    /// Build from an error frame's optional message.
    pub fn from_frame(message: Option<String>) -> Self {
        match message {
            Some(message) => Self {
                message,
                from_producer: true,
            },
            None => Self {
                message: GENERIC_STREAM_ERROR.to_string(),
                from_producer: false,
            },
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        self.message.clone()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        "E_STREAM_BACKEND"
    }
}
