//! Caller-owned conversation transcript.
//!
//! The decoder never touches the transcript. The caller appends each token
//! it receives through [`Transcript::append_token`] and records a failed
//! send with [`Transcript::record_failure`]. Partial assistant content is
//! kept in both cases.

use crate::error::ChatError;
use crate::models::{Message, Role};

/// Separator placed between the codebase context and the first message.
pub const CONTEXT_SEPARATOR: &str = "// User request below.\n\n";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Start a new exchange: append the trimmed user message followed by an
    /// empty assistant message that tokens will stream into.
    ///
    /// Returns `false` and leaves the transcript unchanged if `user_text` is
    /// blank.
    pub fn begin_exchange(&mut self, user_text: &str) -> bool {
        let text = user_text.trim();
        if text.is_empty() {
            return false;
        }
        self.messages.push(Message::user(text));
        self.messages.push(Message::assistant(""));
        true
    }

    /// Append a streamed token to the assistant message being built.
    ///
    /// Only applies when the last message is an assistant message; returns
    /// whether the token was appended.
    pub fn append_token(&mut self, token: &str) -> bool {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => {
                last.content.push_str(token);
                true
            }
            _ => false,
        }
    }

    /// Record a failed send as an error message at the end of the transcript.
    pub fn record_failure(&mut self, err: &ChatError) {
        self.messages.push(Message::error(format!(
            "Error while sending the request: {}",
            err.user_message()
        )));
    }

    /// Build the message list to send to the server.
    ///
    /// Error messages are local-only and left out. When `codebase_context` is
    /// given it is prefixed to the first outbound message.
    pub fn request_messages(&self, codebase_context: Option<&str>) -> Vec<Message> {
        let mut outbound: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| m.role != Role::Error)
            .cloned()
            .collect();

        if let (Some(context), Some(first)) = (codebase_context, outbound.first_mut()) {
            first.content = format!("{}{}{}", context, CONTEXT_SEPARATOR, first.content);
        }
        outbound
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StreamError, TransportError};

    #[test]
    fn test_begin_exchange_appends_user_and_placeholder() {
        let mut transcript = Transcript::new();
        assert!(transcript.begin_exchange("  Hi there \n"));
        assert_eq!(
            transcript.messages(),
            &[Message::user("Hi there"), Message::assistant("")]
        );
    }

    #[test]
    fn test_begin_exchange_rejects_blank() {
        let mut transcript = Transcript::new();
        assert!(!transcript.begin_exchange("   \t"));
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_append_token_targets_last_assistant() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("Hi");
        assert!(transcript.append_token("Hel"));
        assert!(transcript.append_token("lo"));
        assert_eq!(transcript.last(), Some(&Message::assistant("Hello")));
    }

    #[test]
    fn test_append_token_ignored_when_last_is_not_assistant() {
        let mut transcript = Transcript::new();
        assert!(!transcript.append_token("orphan"));

        transcript.begin_exchange("Hi");
        transcript.record_failure(&StreamError::from_frame(None).into());
        assert!(!transcript.append_token("late"));
        assert_eq!(transcript.last().map(|m| m.role), Some(Role::Error));
    }

    #[test]
    fn test_record_failure_keeps_partial_reply() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("Hi");
        transcript.append_token("partial");
        let err: ChatError = TransportError::ReadFault {
            message: "reset".to_string(),
        }
        .into();
        transcript.record_failure(&err);

        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1], Message::assistant("partial"));
        let last = transcript.last().unwrap();
        assert_eq!(last.role, Role::Error);
        assert!(last.content.starts_with("Error while sending the request: "));
    }

    #[test]
    fn test_request_messages_excludes_errors_and_prefixes_context() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("First");
        transcript.append_token("Answer");
        transcript.record_failure(&StreamError::from_frame(Some("boom".to_string())).into());
        transcript.begin_exchange("Second");

        let outbound = transcript.request_messages(Some("fn main() {}\n"));
        assert_eq!(
            outbound,
            vec![
                Message::user("fn main() {}\n// User request below.\n\nFirst"),
                Message::assistant("Answer"),
                Message::user("Second"),
                Message::assistant(""),
            ]
        );
        // The transcript itself is untouched
        assert_eq!(transcript.messages()[0], Message::user("First"));
    }

    #[test]
    fn test_request_messages_without_context() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("Hi");
        assert_eq!(
            transcript.request_messages(None),
            vec![Message::user("Hi"), Message::assistant("")]
        );
        assert!(Transcript::new().request_messages(Some("ctx")).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::new();
        transcript.begin_exchange("Hi");
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
