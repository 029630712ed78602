//! HTTP transport trait abstraction.
//!
//! The chat client never talks to the network directly. It asks an
//! [`HttpClient`] to POST a request and hand back the response body, either
//! as a stream of byte chunks or fully buffered.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;
use thiserror::Error;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Chunks of a response body, in arrival order.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Body of a successful (2xx) response.
pub enum ResponseBody {
    /// Body delivered incrementally.
    Streaming(ByteStream),
    /// Body delivered in one piece.
    Buffered(Bytes),
    /// The response carried no body at all.
    Empty,
}

impl ResponseBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Streaming(_) => f.write_str("ResponseBody::Streaming(..)"),
            ResponseBody::Buffered(bytes) => {
                write!(f, "ResponseBody::Buffered({} bytes)", bytes.len())
            }
            ResponseBody::Empty => f.write_str("ResponseBody::Empty"),
        }
    }
}

/// HTTP client errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
    /// Server returned an error status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
    /// IO error
    #[error("IO error: {0}")]
    Io(String),
    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// Other error
    #[error("HTTP error: {0}")]
    Other(String),
}

/// Trait for the HTTP transport used by the chat client.
///
/// Implementations include the production reqwest-based client and a mock
/// client for tests.
///
/// # Example
///
/// ```ignore
/// use codebase_chat::traits::{HttpClient, Headers, ResponseBody};
///
/// async fn post<C: HttpClient>(client: &C) -> Result<(), HttpError> {
///     match client.post_stream("http://127.0.0.1:8080/api/v1/chat", "{}", &Headers::new()).await? {
///         ResponseBody::Streaming(chunks) => { /* read chunks */ }
///         ResponseBody::Buffered(bytes) => { /* one chunk */ }
///         ResponseBody::Empty => {}
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a POST request and return the response body.
    ///
    /// A non-2xx status must be reported as [`HttpError::ServerError`]
    /// before any body is returned.
    ///
    /// # Arguments
    /// * `url` - The URL to request
    /// * `body` - Request body as a string
    /// * `headers` - Request headers
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ResponseBody, HttpError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        assert_eq!(
            HttpError::ConnectionFailed("refused".to_string()).to_string(),
            "Connection failed: refused"
        );
        assert_eq!(
            HttpError::ServerError {
                status: 500,
                message: "Internal Error".to_string()
            }
            .to_string(),
            "Server error (500): Internal Error"
        );
        assert_eq!(
            HttpError::Io("read failed".to_string()).to_string(),
            "IO error: read failed"
        );
    }

    #[test]
    fn test_response_body_debug_hides_stream() {
        let body = ResponseBody::Buffered(Bytes::from_static(b"abc"));
        assert_eq!(format!("{:?}", body), "ResponseBody::Buffered(3 bytes)");
        assert!(ResponseBody::Empty.is_empty());
    }
}
