//! Wire protocol violations.
//!
//! Raised when the producer sends something the decoder cannot accept.
//! None of these are retried; each aborts the decode session.

use thiserror::Error;

/// Longest excerpt of an offending line kept in an error.
const MAX_EXCERPT_CHARS: usize = 120;

/// A line or stream shape that breaks the chat wire protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// The line is not valid JSON.
    #[error("invalid JSON frame `{line}`: {message}")]
    InvalidJson { line: String, message: String },

    /// The line is JSON but matches no recognized frame shape.
    #[error("unrecognized frame `{line}`")]
    UnrecognizedFrame { line: String },

    /// A frame arrived after the stream had already terminated.
    #[error("frame after terminal frame `{line}`")]
    FrameAfterTerminal { line: String },

    /// The stream ended without a done frame while one was required.
    #[error("stream ended without a terminal frame")]
    MissingTerminalFrame,

    /// The session already failed and cannot take more input.
    #[error("decode session already closed")]
    SessionClosed,
}

impl ProtocolViolation {
    pub fn invalid_json(line: &str, err: &serde_json::Error) -> Self {
        ProtocolViolation::InvalidJson {
            line: excerpt(line),
            message: err.to_string(),
        }
    }

    pub fn unrecognized(line: &str) -> Self {
        ProtocolViolation::UnrecognizedFrame {
            line: excerpt(line),
        }
    }

    pub fn after_terminal(line: &str) -> Self {
        ProtocolViolation::FrameAfterTerminal {
            line: excerpt(line),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ProtocolViolation::InvalidJson { .. } => "E_PROTO_JSON",
            ProtocolViolation::UnrecognizedFrame { .. } => "E_PROTO_FRAME",
            ProtocolViolation::FrameAfterTerminal { .. } => "E_PROTO_AFTER_END",
            ProtocolViolation::MissingTerminalFrame => "E_PROTO_NO_END",
            ProtocolViolation::SessionClosed => "E_PROTO_CLOSED",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ProtocolViolation::InvalidJson { .. } | ProtocolViolation::UnrecognizedFrame { .. } => {
                "Unknown response stream state.".to_string()
            }
            ProtocolViolation::FrameAfterTerminal { .. } => {
                "The server kept sending data after finishing its reply.".to_string()
            }
            ProtocolViolation::MissingTerminalFrame => {
                "The reply ended before the server marked it complete.".to_string()
            }
            ProtocolViolation::SessionClosed => "This reply has already failed.".to_string(),
        }
    }
}

/// Truncate a line for inclusion in an error, on a char boundary.
fn excerpt(line: &str) -> String {
    match line.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}
