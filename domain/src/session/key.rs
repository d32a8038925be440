//! Session keys

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of a consensus session (UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionKey(String);

impl SessionKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let uuid = Uuid::parse_str(s.trim())
            .map_err(|_| DomainError::InvalidSessionKey(s.to_string()))?;
        Ok(Self(uuid.hyphenated().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SessionKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SessionKey> for String {
    fn from(key: SessionKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(SessionKey::generate(), SessionKey::generate());
    }

    #[test]
    fn test_parse_normalizes() {
        let key = SessionKey::parse("  67E55044-10B1-426F-9247-BB680E5FE0C8 ").unwrap();
        assert_eq!(key.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            SessionKey::parse("../etc/passwd"),
            Err(DomainError::InvalidSessionKey(_))
        ));
    }

    #[test]
    fn test_serde_validates() {
        let key = SessionKey::generate();
        let json = serde_json::to_string(&key).unwrap();
        let back: SessionKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
        assert!(serde_json::from_str::<SessionKey>("\"nope\"").is_err());
    }
}
