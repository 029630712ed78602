//! Decoding of the newline-delimited JSON chat stream.
//!
//! The pipeline for one response body is:
//!
//! ```text
//! bytes -> Utf8Decoder -> LineSplitter -> Frame::parse -> DecodeSession -> tokens
//! ```
//!
//! [`DecodeSession`] is the push-style core: feed it text chunks and it calls
//! back once per token. [`TokenStream`] wraps the same session in a
//! `futures::Stream` for callers that prefer to pull.

pub mod decoder;
pub mod frame;
pub mod splitter;
pub mod token_stream;
pub mod utf8;

pub use decoder::{Completion, DecodeSession, SessionState, StreamOutcome};
pub use frame::{Frame, UnknownWireFormat, WireFormat};
pub use splitter::{LineSplitter, Lines};
pub use token_stream::TokenStream;
pub use utf8::Utf8Decoder;
