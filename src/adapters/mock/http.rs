//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that returns predefined bodies
//! or errors, records every request, and counts how many response bodies
//! have been dropped.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures_util::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, ResponseBody};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Stream these chunks, then end
    Stream(Vec<Bytes>),
    /// Stream these chunks, then fail the read
    StreamThenFault(Vec<Bytes>, HttpError),
    /// Return the whole body at once
    Buffered(Bytes),
    /// Return a success status with no body
    Empty,
    /// Fail the request before any body
    Error(HttpError),
    /// Stream these chunks, then never produce another one
    Pending(Vec<Bytes>),
}

impl MockResponse {
    /// Stream a body split into the given string chunks.
    pub fn chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MockResponse::Stream(
            chunks
                .into_iter()
                .map(|c| Bytes::copy_from_slice(c.as_ref().as_bytes()))
                .collect(),
        )
    }
}

/// Increments the shared counter when the body it is attached to is dropped.
struct DropGuard(Arc<AtomicUsize>);

impl Drop for DropGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use codebase_chat::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "http://127.0.0.1:8080/api/v1/chat",
///     MockResponse::chunks(["{\"content\":\"Hi\"}\n", "{\"done\":true}\n"]),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Response when no URL matches
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Number of streamed bodies dropped so far
    dropped_bodies: Arc<AtomicUsize>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a specific URL. The URL is matched exactly.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        lock(&self.responses).insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        *lock(&self.default_response) = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// How many streamed response bodies have been dropped.
    pub fn dropped_bodies(&self) -> usize {
        self.dropped_bodies.load(Ordering::SeqCst)
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        if let Some(response) = lock(&self.responses).get(url) {
            return Some(response.clone());
        }
        lock(&self.default_response).clone()
    }

    fn guarded(&self, body: ByteStream) -> ResponseBody {
        let guard = DropGuard(Arc::clone(&self.dropped_bodies));
        ResponseBody::Streaming(Box::pin(body.map(move |chunk| {
            let _ = &guard;
            chunk
        })))
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<ResponseBody, HttpError> {
        lock(&self.requests).push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });

        match self.get_response(url) {
            Some(MockResponse::Stream(chunks)) => {
                Ok(self.guarded(Box::pin(stream::iter(chunks.into_iter().map(Ok)))))
            }
            Some(MockResponse::StreamThenFault(chunks, err)) => {
                let items = chunks.into_iter().map(Ok).chain(std::iter::once(Err(err)));
                Ok(self.guarded(Box::pin(stream::iter(items))))
            }
            Some(MockResponse::Pending(chunks)) => {
                let body = stream::iter(chunks.into_iter().map(Ok)).chain(stream::pending());
                Ok(self.guarded(Box::pin(body)))
            }
            Some(MockResponse::Buffered(bytes)) => Ok(ResponseBody::Buffered(bytes)),
            Some(MockResponse::Empty) => Ok(ResponseBody::Empty),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/api/v1/chat";

    #[tokio::test]
    async fn test_stream_response_and_recording() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::chunks(["a", "b"]));

        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        let body = client.post_stream(URL, "{}", &headers).await.unwrap();

        let chunks: Vec<Bytes> = match body {
            ResponseBody::Streaming(s) => s.map(|c| c.unwrap()).collect().await,
            other => panic!("unexpected body {:?}", other),
        };
        assert_eq!(chunks, vec![Bytes::from("a"), Bytes::from("b")]);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, URL);
        assert_eq!(requests[0].body, "{}");
        assert_eq!(
            requests[0].headers.get("Accept"),
            Some(&"application/json".to_string())
        );
        assert_eq!(client.dropped_bodies(), 1);
    }

    #[tokio::test]
    async fn test_stream_then_fault() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::StreamThenFault(
            vec![Bytes::from("a")],
            HttpError::Io("reset".to_string()),
        ));
        let ResponseBody::Streaming(mut body) = client.post_stream(URL, "", &Headers::new()).await.unwrap() else {
            panic!("expected streaming body");
        };
        assert_eq!(body.next().await.unwrap().unwrap(), Bytes::from("a"));
        assert_eq!(
            body.next().await.unwrap().unwrap_err(),
            HttpError::Io("reset".to_string())
        );
        assert!(body.next().await.is_none());
    }

    #[tokio::test]
    async fn test_error_and_missing_response() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::Error(HttpError::Timeout("slow".to_string())));
        assert_eq!(
            client.post_stream(URL, "", &Headers::new()).await.unwrap_err(),
            HttpError::Timeout("slow".to_string())
        );
        assert!(matches!(
            client.post_stream("https://other", "", &Headers::new()).await,
            Err(HttpError::Other(_))
        ));
    }

    #[tokio::test]
    async fn test_buffered_and_empty() {
        let client = MockHttpClient::new();
        client.set_response(URL, MockResponse::Buffered(Bytes::from("x")));
        assert!(matches!(
            client.post_stream(URL, "", &Headers::new()).await,
            Ok(ResponseBody::Buffered(_))
        ));
        client.set_response(URL, MockResponse::Empty);
        assert!(client.post_stream(URL, "", &Headers::new()).await.unwrap().is_empty());
    }
}
