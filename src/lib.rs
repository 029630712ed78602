//! codebase-chat - streaming client for the CodebaseAI chat endpoint
//!
//! Sends a conversation to `POST /api/v1/chat` and decodes the
//! newline-delimited JSON reply into tokens as it arrives.
//!
//! ```ignore
//! use codebase_chat::chat::ChatClient;
//! use codebase_chat::config::ChatConfig;
//! use codebase_chat::transcript::Transcript;
//!
//! let chat = ChatClient::new(ChatConfig::from_env())?;
//! let mut transcript = Transcript::new();
//! transcript.begin_exchange("What does main.rs do?");
//! let messages = transcript.request_messages(None);
//! if let Err(e) = chat.send_message(&messages, |t| { transcript.append_token(t); }).await {
//!     transcript.record_failure(&e);
//! }
//! ```

pub mod adapters;
pub mod chat;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod stream;
pub mod traits;
pub mod transcript;

pub use chat::ChatClient;
pub use config::ChatConfig;
pub use error::{ChatError, ChatResult, ErrorKind};
