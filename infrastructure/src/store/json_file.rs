//! JSON file session store
//!
//! Layout: `<dir>/<session-key>.json`. Writes go to a temporary sibling
//! file first and are renamed into place.

use async_trait::async_trait;
use lumin_application::{SessionStore, StoreError};
use lumin_domain::{SessionKey, SessionSnapshot};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXTENSION: &str = "json";

/// Session store backed by a directory of JSON files
pub struct JsonFileSessionStore {
    dir: PathBuf,
}

impl JsonFileSessionStore {
    /// Use `dir` for snapshots; it is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &SessionKey) -> PathBuf {
        self.dir.join(format!("{}.{}", key, EXTENSION))
    }
}

#[async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn load(&self, key: &SessionKey) -> Result<Option<SessionSnapshot>, StoreError> {
        let path = self.path_for(key);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let snapshot = SessionSnapshot::from_json(&json).map_err(|source| StoreError::Corrupt {
            key: key.to_string(),
            source,
        })?;
        debug!("Loaded session {} from {}", key, path.display());
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(&snapshot.key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, snapshot.to_json()?).await?;
        tokio::fs::rename(&tmp, &path).await?;

        debug!("Saved session {} to {}", snapshot.key, path.display());
        Ok(())
    }

    async fn exists(&self, key: &SessionKey) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.path_for(key)).await?)
    }

    async fn list(&self) -> Result<Vec<SessionKey>, StoreError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match SessionKey::parse(stem) {
                Ok(key) => keys.push(key),
                Err(_) => warn!("Ignoring unexpected file in session dir: {}", path.display()),
            }
        }

        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &SessionKey) -> Result<bool, StoreError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
