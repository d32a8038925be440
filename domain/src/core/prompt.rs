//! Prompt value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A prompt to be answered by the council (Value Object)
///
/// Represents the user input that every Responder drafts an answer for
/// and every Reviewer judges answers against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prompt {
    content: String,
}

impl Prompt {
    /// Create a new prompt, rejecting empty or whitespace-only content
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidPrompt(
                "prompt cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Prompt {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Prompt::new(s)
    }
}

impl TryFrom<&str> for Prompt {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Prompt::new(s)
    }
}

impl From<Prompt> for String {
    fn from(p: Prompt) -> Self {
        p.content
    }
}
