//! Session snapshots
//!
//! Explicit structured form of a session for persistence: configuration,
//! shared history and every Responder's private memory.

use super::config::SessionConfig;
use super::key::SessionKey;
use crate::conversation::{ConversationHistory, ResponderMemory};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Persisted memory of one Responder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponderSnapshot {
    pub id: String,
    pub memory: ResponderMemory,
}

/// A complete session for serialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Schema version for forward compatibility
    pub version: u32,
    pub key: SessionKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub config: SessionConfig,
    pub history: ConversationHistory,
    pub responders: Vec<ResponderSnapshot>,
}

impl SessionSnapshot {
    /// Current schema version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(
        key: SessionKey,
        name: Option<String>,
        config: SessionConfig,
        history: ConversationHistory,
        responders: Vec<ResponderSnapshot>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            key,
            name,
            config,
            history,
            responders,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON and check integrity.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::SnapshotMismatch(format!("malformed snapshot: {e}")))?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// Version and shape checks before a snapshot is restored.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.version > Self::CURRENT_VERSION {
            return Err(DomainError::UnsupportedSnapshotVersion {
                found: self.version,
                supported: Self::CURRENT_VERSION,
            });
        }
        if self.responders.len() != self.config.responders {
            return Err(DomainError::SnapshotMismatch(format!(
                "config declares {} responders but snapshot holds {}",
                self.config.responders,
                self.responders.len()
            )));
        }
        self.config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::MemoryEntry;

    fn sample() -> SessionSnapshot {
        let mut history = ConversationHistory::new();
        history.append_exchange("hi", "hello");
        let memory = ResponderMemory::from_entries(vec![MemoryEntry::new("hi", "hello")]);
        SessionSnapshot::new(
            SessionKey::generate(),
            Some("demo".to_string()),
            SessionConfig::new(1, 1),
            history,
            vec![ResponderSnapshot {
                id: "responder-0".to_string(),
                memory,
            }],
        )
    }

    #[test]
    fn test_json_preserves_state() {
        let snapshot = sample();
        let json = snapshot.to_json().unwrap();
        let restored = SessionSnapshot::from_json(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_future_version_rejected() {
        let mut snapshot = sample();
        snapshot.version = 99;
        let json = snapshot.to_json().unwrap();
        assert!(matches!(
            SessionSnapshot::from_json(&json),
            Err(DomainError::UnsupportedSnapshotVersion {
                found: 99,
                supported: 1
            })
        ));
    }

    #[test]
    fn test_responder_count_mismatch_rejected() {
        let mut snapshot = sample();
        snapshot.responders.clear();
        assert!(matches!(
            snapshot.check(),
            Err(DomainError::SnapshotMismatch(_))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(SessionSnapshot::from_json("{").is_err());
    }
}
