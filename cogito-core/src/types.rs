//! Domain types shared across the cogito crates.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_REASONING_TOKENS, MAX_RESPONSE_TOKENS};

/// Role of a chat message in the conversation sent upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The end user's prompt.
    User,
    /// Intermediate reasoning output fed back as context.
    Reasoning,
    /// A model answer.
    Assistant,
}

/// One message in the conversation sent to the upstream engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Creates a reasoning message.
    pub fn reasoning(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Reasoning,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Token budgets for the two generation passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationBudget {
    /// Tokens allowed for the reasoning pass.
    pub reasoning_tokens: u32,
    /// Tokens allowed for the answer pass.
    pub response_tokens: u32,
}

impl Default for GenerationBudget {
    fn default() -> Self {
        Self {
            reasoning_tokens: MAX_REASONING_TOKENS,
            response_tokens: MAX_RESPONSE_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::reasoning("step 1");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"reasoning\""));
    }

    #[test]
    fn test_message_roundtrip() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_string(&msg).unwrap();
        let back: ChatMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
