//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable response bodies

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
