//! Error taxonomy for chat send operations.
//!
//! Every failure of a send is one [`ChatError`], which falls into one of
//! three kinds:
//!
//! | Kind | Raised when | Retried by the library |
//! |------|-------------|------------------------|
//! | TransportError | non-2xx status, missing body, read fault | No |
//! | ProtocolViolation | invalid JSON, unknown frame shape, frame after end | No |
//! | StreamError | the producer sent an error frame | No |
//!
//! All three abort the decode session. Tokens already handed to the caller
//! stay delivered.

mod chat_error;
mod kind;
mod protocol;
mod result;
mod stream;
mod transport;

pub use chat_error::ChatError;
pub use kind::ErrorKind;
pub use protocol::ProtocolViolation;
pub use result::ChatResult;
pub use stream::{StreamError, GENERIC_STREAM_ERROR};
pub use transport::TransportError;
