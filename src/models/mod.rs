//! Conversation data types shared by the client and the transcript.

mod message;

pub use message::{ChatRequest, Message, Role, UnknownRole};
