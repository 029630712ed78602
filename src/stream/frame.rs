//! Frame types and the two wire formats of the chat stream.
//!
//! Each non-blank line of the response body is one JSON object. Two
//! encodings exist in the wild:
//!
//! - [`WireFormat::DoneError`] (canonical): `{"content", "done", "error"}`
//! - [`WireFormat::Success`] (compatibility): `{"content", "success"}`
//!
//! Both classify the same way: failure first, then completion, then content.
//! Anything else is malformed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolViolation;

/// Which of the two stream encodings the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WireFormat {
    /// `{"content": string|null, "done": bool|null, "error": string|null}`
    #[default]
    DoneError,
    /// `{"content": string|null, "success": bool|null}`
    Success,
}

impl WireFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::DoneError => "done-error",
            WireFormat::Success => "success",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown wire format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wire format '{0}' (expected 'done-error' or 'success')")]
pub struct UnknownWireFormat(pub String);

impl FromStr for WireFormat {
    type Err = UnknownWireFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "done-error" | "done_error" | "doneerror" => Ok(WireFormat::DoneError),
            "success" => Ok(WireFormat::Success),
            other => Err(UnknownWireFormat(other.to_string())),
        }
    }
}

/// One decoded unit of the chat stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A token to append to the reply
    Content(String),
    /// The reply is complete
    Done,
    /// The producer failed; carries its message when it sent one
    Error(Option<String>),
}

impl Frame {
    /// Whether no further frame may follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Frame::Done | Frame::Error(_))
    }

    /// Parse one line in the given wire format.
    ///
    /// JSON `null` is treated as an absent field. Extra fields are ignored.
    pub fn parse(line: &str, format: WireFormat) -> Result<Frame, ProtocolViolation> {
        let value: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| ProtocolViolation::invalid_json(line, &e))?;
        if !value.is_object() {
            return Err(ProtocolViolation::unrecognized(line));
        }

        let frame = match format {
            WireFormat::DoneError => {
                let payload: DoneErrorPayload = serde_json::from_value(value)
                    .map_err(|_| ProtocolViolation::unrecognized(line))?;
                payload.classify()
            }
            WireFormat::Success => {
                let payload: SuccessPayload = serde_json::from_value(value)
                    .map_err(|_| ProtocolViolation::unrecognized(line))?;
                payload.classify()
            }
        };
        frame.ok_or_else(|| ProtocolViolation::unrecognized(line))
    }

    /// Encode this frame as one wire line, without the trailing newline.
    ///
    /// Absent fields are omitted. The `Success` format cannot carry an
    /// error message, so it is dropped.
    pub fn to_line(&self, format: WireFormat) -> String {
        let value = match (format, self) {
            (_, Frame::Content(text)) => serde_json::json!({ "content": text }),
            (WireFormat::DoneError, Frame::Done) => serde_json::json!({ "done": true }),
            (WireFormat::DoneError, Frame::Error(message)) => serde_json::json!({
                "error": message.as_deref().unwrap_or(crate::error::GENERIC_STREAM_ERROR)
            }),
            (WireFormat::Success, Frame::Done) => serde_json::json!({ "success": true }),
            (WireFormat::Success, Frame::Error(_)) => serde_json::json!({ "success": false }),
        };
        value.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct DoneErrorPayload {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

impl DoneErrorPayload {
    fn classify(self) -> Option<Frame> {
        if let Some(message) = self.error {
            return Some(Frame::Error(Some(message)));
        }
        if self.done == Some(true) {
            return Some(Frame::Done);
        }
        self.content.map(Frame::Content)
    }
}

#[derive(Debug, Deserialize)]
struct SuccessPayload {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    success: Option<bool>,
}

impl SuccessPayload {
    fn classify(self) -> Option<Frame> {
        match self.success {
            Some(false) => Some(Frame::Error(None)),
            Some(true) => Some(Frame::Done),
            None => self.content.map(Frame::Content),
        }
    }
}
