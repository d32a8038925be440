//! Session manager use case
//!
//! Owns live [`ConsensusSession`]s by key, persists them through a
//! [`SessionStore`], and serializes invocations per session.
//!
//! # Lookup
//!
//! ```text
//! key ──▶ live cache ──hit──▶ session
//!              │ miss
//!              ▼
//!         store.load ──Some──▶ restore ──▶ cache ──▶ session
//!              │ None
//!              ▼
//!         SessionError::NotFound
//! ```
//!
//! # Eviction
//!
//! Idle sessions (older than `idle_ttl`) are dropped from memory, then the
//! least recently used ones until at most `max_live` remain. Sessions with
//! an outstanding handle (e.g. an invocation in flight) are never evicted.
//! Eviction only forgets the in-memory copy; the store keeps it.

use crate::config::SessionLimits;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{ConsensusProgressNotifier, NoProgress};
use crate::ports::session_store::{SessionStore, StoreError};
use crate::session::{ConsensusSession, SessionInfo};
use crate::use_cases::run_consensus::{ConsensusError, ConsensusOrchestrator};
use lumin_domain::{
    ConsensusOutcome, ConversationTurn, DomainError, Prompt, SessionConfig, SessionKey,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Errors that can occur while managing sessions
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionKey),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Consensus(#[from] ConsensusError),
}

struct LiveSession {
    session: Arc<Mutex<ConsensusSession>>,
    last_used: Instant,
}

/// Registry of consensus sessions
pub struct SessionManager {
    gateway: Arc<dyn LlmGateway>,
    store: Arc<dyn SessionStore>,
    orchestrator: ConsensusOrchestrator,
    limits: SessionLimits,
    live: RwLock<HashMap<SessionKey, LiveSession>>,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn LlmGateway>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            gateway,
            store,
            orchestrator: ConsensusOrchestrator::new(),
            limits: SessionLimits::default(),
            live: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_orchestrator(mut self, orchestrator: ConsensusOrchestrator) -> Self {
        self.orchestrator = orchestrator;
        self
    }

    pub fn with_limits(mut self, limits: SessionLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Create and persist a new session
    pub async fn create_session(&self, config: SessionConfig) -> Result<SessionKey, SessionError> {
        self.create_named_session(config, None).await
    }

    /// Create and persist a new session with an optional display name
    pub async fn create_named_session(
        &self,
        config: SessionConfig,
        name: Option<String>,
    ) -> Result<SessionKey, SessionError> {
        let key = SessionKey::generate();
        let mut session = ConsensusSession::build(key.clone(), config, Arc::clone(&self.gateway))?;
        if let Some(name) = name {
            session = session.with_name(name);
        }

        self.store.save(&session.to_snapshot()).await?;
        info!(
            "Created session {} ({} responders, {} reviewers)",
            key,
            session.responders().len(),
            session.reviewers().len()
        );

        self.live.write().await.insert(
            key.clone(),
            LiveSession {
                session: Arc::new(Mutex::new(session)),
                last_used: Instant::now(),
            },
        );
        self.enforce_limits().await;

        Ok(key)
    }

    /// Answer a prompt and return the final text
    pub async fn send(&self, key: &SessionKey, prompt: &str) -> Result<String, SessionError> {
        self.send_with_progress(key, prompt, &NoProgress)
            .await
            .map(|outcome| outcome.answer)
    }

    /// Answer a prompt and return the full consensus report
    ///
    /// The session is saved before returning, also when the run fails, so
    /// drafts already added to Responder memory survive eviction. Concurrent
    /// calls for the same key run one after another.
    pub async fn send_with_progress(
        &self,
        key: &SessionKey,
        prompt: &str,
        progress: &dyn ConsensusProgressNotifier,
    ) -> Result<ConsensusOutcome, SessionError> {
        let prompt = Prompt::new(prompt)?;
        let handle = self.session(key).await?;

        let outcome = {
            let mut session = handle.lock().await;
            // Deleted while this call waited for the lock
            if !self.is_current(key, &handle).await {
                return Err(SessionError::NotFound(key.clone()));
            }

            let result = self
                .orchestrator
                .execute_with_progress(&mut session, &prompt, progress)
                .await;
            if let Err(e) = &result {
                warn!("Send on session {} failed: {}", key, e);
            }
            self.store.save(&session.to_snapshot()).await?;
            if result.is_ok() {
                debug!(
                    "Session {} now holds {} exchanges",
                    key,
                    session.history().exchange_count()
                );
            }
            result
        };

        drop(handle);
        self.touch(key).await;
        self.enforce_limits().await;

        outcome.map_err(SessionError::from)
    }

    /// Shared history of a session
    pub async fn history(&self, key: &SessionKey) -> Result<Vec<ConversationTurn>, SessionError> {
        let handle = self.session(key).await?;
        let session = handle.lock().await;
        Ok(session.turns())
    }

    pub async fn describe(&self, key: &SessionKey) -> Result<SessionInfo, SessionError> {
        let handle = self.session(key).await?;
        let session = handle.lock().await;
        Ok(session.info())
    }

    /// Keys of every known session, live or stored
    pub async fn list_sessions(&self) -> Result<Vec<SessionKey>, SessionError> {
        let mut keys = self.store.list().await?;
        keys.extend(self.live.read().await.keys().cloned());
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    /// Rebuild every Responder's memory from the shared history, dropping
    /// rejected drafts, and save the session
    pub async fn reset_memories(&self, key: &SessionKey) -> Result<(), SessionError> {
        let handle = self.session(key).await?;
        let mut session = handle.lock().await;
        if !self.is_current(key, &handle).await {
            return Err(SessionError::NotFound(key.clone()));
        }
        session.reset_responders_from_history();
        self.store.save(&session.to_snapshot()).await?;
        info!("Reset responder memories of session {}", key);
        Ok(())
    }

    /// Remove a session from memory and from the store
    ///
    /// Waits for an in-flight send on the same session, so that send cannot
    /// save the session back afterwards.
    pub async fn delete_session(&self, key: &SessionKey) -> Result<bool, SessionError> {
        let handle = self
            .live
            .read()
            .await
            .get(key)
            .map(|entry| Arc::clone(&entry.session));
        let _guard = match &handle {
            Some(handle) => Some(handle.lock().await),
            None => None,
        };

        let was_live = self.live.write().await.remove(key).is_some();
        let was_stored = self.store.delete(key).await?;
        if was_live || was_stored {
            info!("Deleted session {}", key);
        }
        Ok(was_live || was_stored)
    }

    /// Number of sessions currently held in memory
    pub async fn live_count(&self) -> usize {
        self.live.read().await.len()
    }

    /// Apply idle and size limits to the live cache; returns evicted count
    pub async fn enforce_limits(&self) -> usize {
        let mut live = self.live.write().await;
        let before = live.len();

        live.retain(|key, entry| {
            let keep = Self::in_use(entry) || entry.last_used.elapsed() < self.limits.idle_ttl;
            if !keep {
                debug!("Evicting idle session {}", key);
            }
            keep
        });

        if live.len() > self.limits.max_live {
            let mut idle: Vec<(SessionKey, Instant)> = live
                .iter()
                .filter(|(_, entry)| !Self::in_use(entry))
                .map(|(key, entry)| (key.clone(), entry.last_used))
                .collect();
            idle.sort_by_key(|(_, last_used)| *last_used);

            let excess = live.len() - self.limits.max_live;
            for (key, _) in idle.into_iter().take(excess) {
                debug!("Evicting least recently used session {}", key);
                live.remove(&key);
            }
        }

        before - live.len()
    }

    /// Whether `handle` is still the live session registered under `key`
    async fn is_current(&self, key: &SessionKey, handle: &Arc<Mutex<ConsensusSession>>) -> bool {
        self.live
            .read()
            .await
            .get(key)
            .is_some_and(|entry| Arc::ptr_eq(&entry.session, handle))
    }

    fn in_use(entry: &LiveSession) -> bool {
        Arc::strong_count(&entry.session) > 1
    }

    async fn touch(&self, key: &SessionKey) {
        if let Some(entry) = self.live.write().await.get_mut(key) {
            entry.last_used = Instant::now();
        }
    }

    /// Live handle for `key`, restoring from the store on a cache miss
    async fn session(
        &self,
        key: &SessionKey,
    ) -> Result<Arc<Mutex<ConsensusSession>>, SessionError> {
        if let Some(entry) = self.live.write().await.get_mut(key) {
            entry.last_used = Instant::now();
            return Ok(Arc::clone(&entry.session));
        }

        let snapshot = self
            .store
            .load(key)
            .await?
            .ok_or_else(|| SessionError::NotFound(key.clone()))?;
        let restored = ConsensusSession::restore(snapshot, Arc::clone(&self.gateway))?;
        debug!("Restored session {} from store", key);

        let handle = {
            let mut live = self.live.write().await;
            let entry = live.entry(key.clone()).or_insert_with(|| LiveSession {
                session: Arc::new(Mutex::new(restored)),
                last_used: Instant::now(),
            });
            entry.last_used = Instant::now();
            Arc::clone(&entry.session)
        };
        self.enforce_limits().await;

        Ok(handle)
    }
}
