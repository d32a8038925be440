//! Consensus session aggregate

use crate::participants::{GatewayResponder, GatewayReviewer, Responder, Reviewer};
use crate::ports::llm_gateway::LlmGateway;
use lumin_domain::{
    ConversationHistory, ConversationTurn, DomainError, ResponderMemory, ResponderSnapshot,
    SessionConfig, SessionKey, SessionSnapshot,
};
use serde::Serialize;
use std::sync::Arc;

/// One conversation: its participants, shared history and configuration
///
/// Responders and Reviewers live as long as the session. The shared history
/// only ever grows by whole User/Bot exchanges.
pub struct ConsensusSession {
    key: SessionKey,
    name: Option<String>,
    config: SessionConfig,
    pub(crate) responders: Vec<Box<dyn Responder>>,
    pub(crate) reviewers: Vec<Box<dyn Reviewer>>,
    pub(crate) history: ConversationHistory,
}

impl ConsensusSession {
    /// Assemble a session from already-built participants.
    pub fn new(
        key: SessionKey,
        config: SessionConfig,
        responders: Vec<Box<dyn Responder>>,
        reviewers: Vec<Box<dyn Reviewer>>,
    ) -> Self {
        Self {
            key,
            name: None,
            config,
            responders,
            reviewers,
            history: ConversationHistory::new(),
        }
    }

    /// Build gateway-backed participants according to `config`.
    pub fn build(
        key: SessionKey,
        config: SessionConfig,
        gateway: Arc<dyn LlmGateway>,
    ) -> Result<Self, DomainError> {
        config.validate()?;

        let responder_spec = config.responder_spec();
        let reviewer_spec = config.reviewer_spec();

        let responders = (0..config.responders)
            .map(|i| {
                GatewayResponder::new(
                    responder_spec.clone(),
                    i,
                    Arc::clone(&gateway),
                    config.memory_window,
                )
                .map(|r| Box::new(r) as Box<dyn Responder>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let reviewers = (0..config.reviewers)
            .map(|i| {
                GatewayReviewer::new(reviewer_spec.clone(), i, Arc::clone(&gateway))
                    .map(|r| Box::new(r) as Box<dyn Reviewer>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(key, config, responders, reviewers))
    }

    /// Rebuild a saved session with fresh gateway-backed participants.
    pub fn restore(
        snapshot: SessionSnapshot,
        gateway: Arc<dyn LlmGateway>,
    ) -> Result<Self, DomainError> {
        snapshot.check()?;

        let mut session = Self::build(snapshot.key, snapshot.config, gateway)?;
        session.name = snapshot.name;
        session.history = snapshot.history;
        for (responder, saved) in session.responders.iter_mut().zip(snapshot.responders) {
            responder.reset_history(saved.memory);
        }
        Ok(session)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn turns(&self) -> Vec<ConversationTurn> {
        self.history.turns().to_vec()
    }

    pub fn responders(&self) -> &[Box<dyn Responder>] {
        &self.responders
    }

    pub fn reviewers(&self) -> &[Box<dyn Reviewer>] {
        &self.reviewers
    }

    /// Memory of every Responder, in Responder order
    pub fn responder_memories(&self) -> Vec<&ResponderMemory> {
        self.responders.iter().map(|r| r.memory()).collect()
    }

    /// Replace every Responder's memory with pairs rebuilt from the shared
    /// history, dropping any rejected drafts.
    pub fn reset_responders_from_history(&mut self) {
        let memory = ResponderMemory::from_turns(self.history.turns());
        for responder in &mut self.responders {
            responder.reset_history(memory.clone());
        }
    }

    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.key.clone(),
            self.name.clone(),
            self.config.clone(),
            self.history.clone(),
            self.responders
                .iter()
                .map(|r| ResponderSnapshot {
                    id: r.id().to_string(),
                    memory: r.memory().clone(),
                })
                .collect(),
        )
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            key: self.key.clone(),
            name: self.name.clone(),
            responders: self.responders.len(),
            reviewers: self.reviewers.len(),
            max_rounds: self.config.max_rounds,
            turns: self.history.len(),
        }
    }
}

/// Summary of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub key: SessionKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub responders: usize,
    pub reviewers: usize,
    pub max_rounds: usize,
    pub turns: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use lumin_domain::MemoryEntry;

    struct EchoGateway;

    #[async_trait]
    impl LlmGateway for EchoGateway {
        async fn ask(&self, prompt: &str) -> Result<String, GatewayError> {
            Ok(format!("echo {}", prompt.len()))
        }
    }

    fn gateway() -> Arc<dyn LlmGateway> {
        Arc::new(EchoGateway)
    }

    #[test]
    fn test_build_creates_participants() {
        let session =
            ConsensusSession::build(SessionKey::generate(), SessionConfig::new(3, 2), gateway())
                .unwrap();

        assert_eq!(session.responders().len(), 3);
        assert_eq!(session.reviewers().len(), 2);
        assert_eq!(session.responders()[2].id(), "responder-2");
        assert_eq!(session.reviewers()[1].id(), "reviewer-1");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let result =
            ConsensusSession::build(SessionKey::generate(), SessionConfig::new(0, 1), gateway());
        assert!(result.is_err());
    }

    #[test]
    fn test_snapshot_restore_preserves_state() {
        let mut session =
            ConsensusSession::build(SessionKey::generate(), SessionConfig::new(2, 1), gateway())
                .unwrap()
                .with_name("demo");
        session.history.append_exchange("q", "a");
        session.responders[0].reset_history(ResponderMemory::from_entries(vec![
            MemoryEntry::new("q", "draft"),
            MemoryEntry::new("q", "a"),
        ]));

        let snapshot = session.to_snapshot();
        let restored = ConsensusSession::restore(snapshot.clone(), gateway()).unwrap();

        assert_eq!(restored.to_snapshot(), snapshot);
        assert_eq!(restored.name(), Some("demo"));
        assert_eq!(restored.responder_memories()[0].len(), 2);
        assert!(restored.responder_memories()[1].is_empty());
    }

    #[test]
    fn test_reset_responders_from_history() {
        let mut session =
            ConsensusSession::build(SessionKey::generate(), SessionConfig::new(2, 0), gateway())
                .unwrap();
        session.history.append_exchange("q1", "a1");
        session.history.append_exchange("q2", "a2");

        session.reset_responders_from_history();

        for memory in session.responder_memories() {
            assert_eq!(memory.len(), 2);
            assert_eq!(memory.entries()[1], MemoryEntry::new("q2", "a2"));
        }
    }

    #[test]
    fn test_info() {
        let mut session =
            ConsensusSession::build(SessionKey::generate(), SessionConfig::new(1, 1), gateway())
                .unwrap();
        session.history.append_exchange("q", "a");

        let info = session.info();
        assert_eq!(info.responders, 1);
        assert_eq!(info.reviewers, 1);
        assert_eq!(info.max_rounds, 6);
        assert_eq!(info.turns, 2);
        assert_eq!(&info.key, session.key());
    }
}
