//! In-memory session store

use async_trait::async_trait;
use lumin_application::{SessionStore, StoreError};
use lumin_domain::{SessionKey, SessionSnapshot};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Session store that lives only as long as the process
#[derive(Default)]
pub struct InMemorySessionStore {
    snapshots: RwLock<HashMap<SessionKey, SessionSnapshot>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<SessionSnapshot>, StoreError> {
        Ok(self.snapshots.read().await.get(key).cloned())
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .await
            .insert(snapshot.key.clone(), snapshot.clone());
        Ok(())
    }

    async fn exists(&self, key: &SessionKey) -> Result<bool, StoreError> {
        Ok(self.snapshots.read().await.contains_key(key))
    }

    async fn list(&self) -> Result<Vec<SessionKey>, StoreError> {
        let mut keys: Vec<SessionKey> = self.snapshots.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &SessionKey) -> Result<bool, StoreError> {
        Ok(self.snapshots.write().await.remove(key).is_some())
    }
}
