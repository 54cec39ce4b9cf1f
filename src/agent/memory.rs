//! Conversation memory buffer.

use crate::llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "ai", alias = "assistant")]
    Assistant,
}

/// One message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        match turn.role {
            Role::Human => ChatMessage::User(turn.content.clone()),
            Role::Assistant => ChatMessage::assistant(turn.content.clone()),
        }
    }
}

/// Append-only list of turns, cleared wholesale.
///
/// Unbounded: every exchange is kept until [`ConversationMemory::clear`].
#[derive(Debug, Clone, Default)]
pub struct ConversationMemory {
    turns: Vec<ConversationTurn>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Record a question and its answer.
    pub fn push_exchange(&mut self, question: &str, answer: &str) {
        self.push(ConversationTurn::human(question));
        self.push(ConversationTurn::assistant(answer));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Completed human/assistant pairs.
    pub fn exchanges(&self) -> usize {
        self.turns.len() / 2
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
