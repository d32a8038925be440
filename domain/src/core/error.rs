//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Invalid session config: {0}")]
    InvalidConfig(String),

    #[error("Invalid session key: {0}")]
    InvalidSessionKey(String),

    #[error("Invalid output pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Snapshot does not match session config: {0}")]
    SnapshotMismatch(String),

    #[error("Unsupported snapshot version {found} (max supported {supported})")]
    UnsupportedSnapshotVersion { found: u32, supported: u32 },
}

impl DomainError {
    /// Check if this error was caused by invalid caller input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPrompt(_)
                | DomainError::InvalidConfig(_)
                | DomainError::InvalidSessionKey(_)
                | DomainError::InvalidPattern { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_prompt_display() {
        let error = DomainError::InvalidPrompt("empty".to_string());
        assert_eq!(error.to_string(), "Invalid prompt: empty");
    }

    #[test]
    fn test_is_invalid_input() {
        assert!(DomainError::InvalidConfig("x".to_string()).is_invalid_input());
        assert!(
            !DomainError::UnsupportedSnapshotVersion {
                found: 9,
                supported: 1
            }
            .is_invalid_input()
        );
        assert!(!DomainError::SnapshotMismatch("x".to_string()).is_invalid_input());
    }
}
