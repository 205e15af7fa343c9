//! Conversation turns passed through from the caller.

use serde::{Deserialize, Serialize};

/// One prior message of the caller's conversation.
///
/// Roles are not interpreted beyond phrasing; the history is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// True when the caller sent any earlier turn, whatever its role.
pub fn has_prior_exchange(history: &[ConversationTurn]) -> bool {
    !history.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_role_and_content() {
        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role": "user", "content": "hi"}"#).unwrap();
        assert_eq!(turn, ConversationTurn::user("hi"));
    }

    #[test]
    fn any_prior_turn_counts_as_exchange() {
        assert!(!has_prior_exchange(&[]));
        assert!(has_prior_exchange(&[ConversationTurn::user("hello")]));
        assert!(has_prior_exchange(&[ConversationTurn::new("system", "be brief")]));
        assert!(has_prior_exchange(&[
            ConversationTurn::user("hello"),
            ConversationTurn::assistant("hi there"),
        ]));
    }
}
