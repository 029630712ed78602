//! Unified error type for a chat send operation.
//!
//! A send either succeeds or fails with exactly one `ChatError`. Tokens
//! delivered before the failure stay delivered; the error only reports why
//! the reply stopped.

use thiserror::Error;

use super::kind::ErrorKind;
use super::protocol::ProtocolViolation;
use super::stream::StreamError;
use super::transport::TransportError;

/// Failure of a chat send operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// The request or body read failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The producer broke the wire protocol.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// The producer reported a failure in-band.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl ChatError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::Transport(_) => ErrorKind::TransportError,
            ChatError::Protocol(_) => ErrorKind::ProtocolViolation,
            ChatError::Stream(_) => ErrorKind::StreamError,
        }
    }

    /// Whether resending the whole request might succeed.
    ///
    /// Only transient transport failures qualify. The library never acts on
    /// this itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Transport(err) => match err {
                TransportError::ConnectionFailed { .. }
                | TransportError::Timeout { .. }
                | TransportError::ReadFault { .. } => true,
                TransportError::HttpStatus { status, .. } => {
                    *status >= 500 || *status == 429 || *status == 408
                }
                _ => false,
            },
            ChatError::Protocol(_) | ChatError::Stream(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Transport(err) => err.user_message(),
            ChatError::Protocol(err) => err.user_message(),
            ChatError::Stream(err) => err.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Transport(err) => err.error_code(),
            ChatError::Protocol(err) => err.error_code(),
            ChatError::Stream(err) => err.error_code(),
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.kind().recovery_hint()
    }
}
