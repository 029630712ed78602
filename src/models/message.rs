use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// Codebase context supplied alongside the conversation
    Codebase,
    /// A failure shown in the transcript; never sent to the server
    Error,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Codebase => "codebase",
            Role::Error => "error",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            "codebase" => Ok(Role::Codebase),
            "error" => Ok(Role::Error),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// One entry of the conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn codebase(content: impl Into<String>) -> Self {
        Self::new(Role::Codebase, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(Role::Error, content)
    }
}

/// Request body for `POST /api/v1/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Codebase).unwrap();
        assert_eq!(json, "\"codebase\"");
        let role: Role = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(role, Role::Assistant);
    }

    #[test]
    fn test_role_from_str() {
        for role in [Role::User, Role::Assistant, Role::Codebase, Role::Error] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(
            "system".parse::<Role>(),
            Err(UnknownRole("system".to_string()))
        );
        assert!("User".parse::<Role>().is_err());
    }

    #[test]
    fn test_unknown_role_rejected_by_serde() {
        let result: Result<Message, _> =
            serde_json::from_str(r#"{"role":"moderator","content":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let request = ChatRequest::new(vec![Message::user("Hi"), Message::assistant("")]);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "messages": [
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": ""}
                ]
            })
        );
    }
}
