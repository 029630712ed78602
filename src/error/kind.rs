//! Error kind classification for stream decoding failures.
//!
//! Every failure of a chat send operation falls into exactly one of three
//! kinds. Callers use the kind to decide how to present the failure; the
//! library itself never retries.

use std::fmt;

/// High-level classification of a failed send operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request or the body read failed (non-2xx status, missing body,
    /// connection or read fault).
    TransportError,

    /// The producer broke the wire protocol (invalid JSON, unrecognized
    /// frame shape, frame after a terminal frame).
    ProtocolViolation,

    /// The producer reported a failure in-band with an error frame.
    StreamError,
}

impl ErrorKind {
    /// Returns a short label for the kind suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TransportError => "transport",
            ErrorKind::ProtocolViolation => "protocol",
            ErrorKind::StreamError => "stream",
        }
    }

    /// Returns a suggested next step for the user.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorKind::TransportError => "Check that the server is running and resend the message.",
            ErrorKind::ProtocolViolation => {
                "The client and server may disagree on the stream format. Check the wire format setting."
            }
            ErrorKind::StreamError => "Resend the message. If it keeps failing, check the server logs.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
