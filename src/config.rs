//! Client configuration.
//!
//! Use the builder methods to customize a [`ChatConfig`], or read it from
//! the environment with [`ChatConfig::from_env`].
//!
//! # Example
//!
//! ```ignore
//! use codebase_chat::config::ChatConfig;
//! use codebase_chat::stream::WireFormat;
//!
//! let config = ChatConfig::default()
//!     .with_base_url("http://localhost:9000")
//!     .with_wire_format(WireFormat::Success);
//! ```

use std::time::Duration;

use crate::stream::WireFormat;

/// Server address used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Path of the streaming chat endpoint.
pub const CHAT_PATH: &str = "/api/v1/chat";

pub const ENV_URL: &str = "CODEBASE_CHAT_URL";
pub const ENV_WIRE_FORMAT: &str = "CODEBASE_CHAT_WIRE_FORMAT";
pub const ENV_REQUIRE_DONE: &str = "CODEBASE_CHAT_REQUIRE_DONE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Scheme, host and port of the chat server (default: http://127.0.0.1:8080)
    pub base_url: String,
    /// Encoding of the response stream (default: done-error)
    pub wire_format: WireFormat,
    /// Fail when the body ends without a done frame
    pub require_terminal_frame: bool,
    /// Limit on establishing the connection. The streamed body has no limit.
    pub request_timeout: Option<Duration>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            wire_format: WireFormat::default(),
            require_terminal_frame: false,
            request_timeout: None,
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }

    pub fn with_require_terminal_frame(mut self, require: bool) -> Self {
        self.require_terminal_frame = require;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CHAT_PATH)
    }

    /// Create config from `CODEBASE_CHAT_*` environment variables.
    ///
    /// Unset variables keep their defaults. Invalid values are logged and
    /// ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_URL) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }

        if let Ok(raw) = std::env::var(ENV_WIRE_FORMAT) {
            match raw.parse::<WireFormat>() {
                Ok(format) => config.wire_format = format,
                Err(e) => tracing::warn!(var = ENV_WIRE_FORMAT, error = %e, "ignoring invalid value"),
            }
        }

        if let Ok(raw) = std::env::var(ENV_REQUIRE_DONE) {
            match parse_flag(&raw) {
                Some(flag) => config.require_terminal_frame = flag,
                None => tracing::warn!(var = ENV_REQUIRE_DONE, value = %raw, "ignoring invalid value"),
            }
        }

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "f" | "no" | "n" | "off" | "" => Some(false),
        _ => None,
    }
}
