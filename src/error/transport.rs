//! Transport-level error types.
//!
//! These errors cover everything that can go wrong before a line reaches the
//! decoder: the request itself, the response status, and reading the body.

use thiserror::Error;

use crate::traits::HttpError;

/// Failures of the underlying request or body read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection to the server failed.
    #[error("connection to {url} failed: {message}")]
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// The server answered with a non-2xx status.
    #[error("{status} {message}")]
    HttpStatus { status: u16, message: String },

    /// The response carried no body where one was required.
    #[error("response had no body")]
    MissingBody,

    /// Reading the body failed after decoding had started.
    #[error("failed to read response stream: {message}")]
    ReadFault { message: String },

    /// The configured URL could not be used.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// Generic transport error.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::ConnectionFailed { .. } => {
                "Unable to connect to the chat server. Is it running?".to_string()
            }
            TransportError::Timeout { .. } => {
                "The chat server did not answer in time.".to_string()
            }
            TransportError::HttpStatus { status, message } => match *status {
                400 => "The chat request was rejected as invalid.".to_string(),
                404 => "The chat endpoint was not found. Check the server URL.".to_string(),
                500..=599 => format!("The chat server failed ({} {}).", status, message),
                _ => format!("The chat server returned an error ({} {}).", status, message),
            },
            TransportError::MissingBody => "The chat server sent an empty response.".to_string(),
            TransportError::ReadFault { .. } => {
                "The connection dropped while the reply was streaming.".to_string()
            }
            TransportError::InvalidUrl(url) => format!("The chat server URL '{}' is invalid.", url),
            TransportError::Encode(_) => "The chat request could not be encoded.".to_string(),
            TransportError::Other(message) => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            TransportError::ConnectionFailed { .. } => "E_NET_CONN",
            TransportError::Timeout { .. } => "E_NET_TIMEOUT",
            TransportError::HttpStatus { .. } => "E_NET_HTTP",
            TransportError::MissingBody => "E_NET_NO_BODY",
            TransportError::ReadFault { .. } => "E_NET_READ",
            TransportError::InvalidUrl(_) => "E_NET_URL",
            TransportError::Encode(_) => "E_NET_ENCODE",
            TransportError::Other(_) => "E_NET_OTHER",
        }
    }

    /// Map a fault raised while the body was being read.
    ///
    /// Any transport fault after the status line has been accepted is a read
    /// fault, whatever the adapter called it.
    pub fn mid_stream(err: HttpError) -> Self {
        TransportError::ReadFault {
            message: err.to_string(),
        }
    }
}

impl From<HttpError> for TransportError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => TransportError::ConnectionFailed {
                url: String::new(),
                message,
            },
            HttpError::Timeout(message) => TransportError::Timeout { message },
            HttpError::ServerError { status, message } => {
                TransportError::HttpStatus { status, message }
            }
            HttpError::Io(message) => TransportError::ReadFault { message },
            HttpError::InvalidUrl(url) => TransportError::InvalidUrl(url),
            HttpError::Other(message) => TransportError::Other(message),
        }
    }
}
