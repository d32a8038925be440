//! Session store port
//!
//! Persistence boundary for consensus sessions. Stores deal only in
//! [`SessionSnapshot`]s; turning a snapshot back into live participants is
//! the session's job.

use async_trait::async_trait;
use lumin_domain::{DomainError, SessionKey, SessionSnapshot};
use thiserror::Error;

/// Errors that can occur in a session store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt snapshot for session {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: DomainError,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for session snapshots
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load a snapshot, or `None` if the key is unknown
    async fn load(&self, key: &SessionKey) -> Result<Option<SessionSnapshot>, StoreError>;

    /// Insert or overwrite a snapshot
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError>;

    async fn exists(&self, key: &SessionKey) -> Result<bool, StoreError>;

    /// All stored keys
    async fn list(&self) -> Result<Vec<SessionKey>, StoreError>;

    /// Remove a snapshot; returns whether anything was removed
    async fn delete(&self, key: &SessionKey) -> Result<bool, StoreError>;
}
