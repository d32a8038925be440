//! Shared conversation history

use serde::{Deserialize, Serialize};

/// Who said a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speaker {
    User,
    Bot,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Bot => "Bot",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single (speaker, text) turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }
}

/// Ordered conversation history shared by the whole session.
///
/// Only grows by whole exchanges: [`append_exchange`](Self::append_exchange)
/// pushes exactly one User turn followed by one Bot turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHistory {
    turns: Vec<ConversationTurn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one (User, prompt) and one (Bot, answer) turn.
    pub fn append_exchange(&mut self, prompt: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ConversationTurn::user(prompt));
        self.turns.push(ConversationTurn::bot(answer));
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

    /// Number of completed User/Bot exchanges.
    pub fn exchange_count(&self) -> usize {
        self.turns.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_exchange_adds_two_turns() {
        let mut history = ConversationHistory::new();
        history.append_exchange("Hello", "Hi there!");

        assert_eq!(history.len(), 2);
        assert_eq!(history.exchange_count(), 1);
        assert_eq!(history.turns()[0], ConversationTurn::user("Hello"));
        assert_eq!(history.turns()[1], ConversationTurn::bot("Hi there!"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut history = ConversationHistory::new();
        history.append_exchange("a", "b");

        let json = serde_json::to_value(&history).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["speaker"], "User");
        assert_eq!(json[1]["text"], "b");
    }

    #[test]
    fn test_speaker_display() {
        assert_eq!(Speaker::User.to_string(), "User");
        assert_eq!(Speaker::Bot.to_string(), "Bot");
    }
}
