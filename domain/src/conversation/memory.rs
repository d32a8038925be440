//! Responder-private memory
//!
//! Each Responder remembers every (prompt, answer) pair it produced,
//! including drafts that reviewers rejected. A bounded window of the most
//! recent entries is rendered into the Responder's next prompt and handed
//! to Reviewers as the candidate's context.

use super::turn::{ConversationTurn, Speaker};
use serde::{Deserialize, Serialize};

/// Default number of memory entries rendered into a prompt
pub const DEFAULT_MEMORY_WINDOW: usize = 20;

/// One remembered exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub prompt: String,
    pub answer: String,
}

impl MemoryEntry {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Render the entry the way it is embedded in chat-history sections.
    pub fn render(&self) -> String {
        format!(
            "[Prompt] {} [/Prompt]\n[Answer] {} [/Answer]",
            self.prompt, self.answer
        )
    }
}

/// Append-only memory of a single Responder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponderMemory {
    entries: Vec<MemoryEntry>,
}

impl ResponderMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<MemoryEntry>) -> Self {
        Self { entries }
    }

    /// Build memory from shared conversation turns.
    ///
    /// Each User turn immediately followed by a Bot turn becomes one entry.
    /// Unpaired turns are skipped.
    pub fn from_turns(turns: &[ConversationTurn]) -> Self {
        let entries = turns
            .windows(2)
            .filter(|pair| pair[0].speaker == Speaker::User && pair[1].speaker == Speaker::Bot)
            .map(|pair| MemoryEntry::new(pair[0].text.clone(), pair[1].text.clone()))
            .collect();
        Self { entries }
    }

    pub fn push(&mut self, entry: MemoryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent `k` entries, oldest first.
    pub fn window(&self, k: usize) -> &[MemoryEntry] {
        let start = self.entries.len().saturating_sub(k);
        &self.entries[start..]
    }

    /// Render the most recent `k` entries as a chat-history block.
    pub fn render(&self, k: usize) -> String {
        self.window(k)
            .iter()
            .map(MemoryEntry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(n: usize) -> ResponderMemory {
        let mut memory = ResponderMemory::new();
        for i in 0..n {
            memory.push(MemoryEntry::new(format!("p{}", i), format!("a{}", i)));
        }
        memory
    }

    #[test]
    fn test_window_keeps_most_recent() {
        let memory = memory_with(25);
        let window = memory.window(DEFAULT_MEMORY_WINDOW);

        assert_eq!(window.len(), 20);
        assert_eq!(window[0].prompt, "p5");
        assert_eq!(window[19].prompt, "p24");
    }

    #[test]
    fn test_window_larger_than_memory() {
        let memory = memory_with(3);
        assert_eq!(memory.window(20).len(), 3);
        assert!(memory.window(0).is_empty());
    }

    #[test]
    fn test_render_format() {
        let memory = memory_with(2);
        let rendered = memory.render(1);
        assert_eq!(rendered, "[Prompt] p1 [/Prompt]\n[Answer] a1 [/Answer]");
        assert!(ResponderMemory::new().render(20).is_empty());
    }

    #[test]
    fn test_from_turns_pairs_user_and_bot() {
        let turns = vec![
            ConversationTurn::user("Hello"),
            ConversationTurn::bot("Hi there!"),
            ConversationTurn::user("How are you?"),
            ConversationTurn::bot("I am good, thank you!"),
            ConversationTurn::user("dangling"),
        ];
        let memory = ResponderMemory::from_turns(&turns);

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.entries()[1], MemoryEntry::new("How are you?", "I am good, thank you!"));
    }
}
