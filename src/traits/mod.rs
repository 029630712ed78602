//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - the transport that carries a chat request and returns
//!   its response body

pub mod http;

pub use http::{ByteStream, Headers, HttpClient, HttpError, ResponseBody};
