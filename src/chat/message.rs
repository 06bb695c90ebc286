//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the conversation transcript.
///
/// The active assistant message grows monotonically: `content` by chunk
/// concatenation, `cards` by id-deduplicated appends. `seeking` holds the
/// lookup-in-progress label while the backend is resolving a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Accumulated text content
    pub content: String,
    /// Cards attached during this turn, deduplicated by card id
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    /// Label shown while a card lookup is in progress, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeking: Option<String>,
    /// When the message was created
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a user message from a submitted query.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            cards: Vec::new(),
            seeking: None,
            created_at: Utc::now(),
        }
    }

    /// Create the empty assistant placeholder for a new turn.
    pub fn assistant_placeholder() -> Self {
        Self {
            role: Role::Assistant,
            content: String::new(),
            cards: Vec::new(),
            seeking: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_seeking(&self) -> bool {
        self.seeking.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_empty_assistant() {
        let msg = ChatMessage::assistant_placeholder();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.content.is_empty());
        assert!(msg.cards.is_empty());
        assert!(!msg.is_seeking());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::user("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
    }
}
