//! Result type alias for chat operations.

use super::chat_error::ChatError;

/// Type alias for Results using ChatError.
///
/// # Example
///
/// ```ignore
/// use codebase_chat::error::ChatResult;
///
/// fn send(messages: &[Message]) -> ChatResult<StreamOutcome> {
///     // ...
/// }
/// ```
pub type ChatResult<T> = Result<T, ChatError>;
