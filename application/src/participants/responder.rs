//! Gateway-backed Responder

use super::Responder;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use lumin_domain::core::string::preview;
use lumin_domain::{
    DomainError, MemoryEntry, OutputPattern, ParticipantSpec, PromptTemplate, ResponderMemory,
};
use std::sync::Arc;
use tracing::debug;

/// Responder that asks an [`LlmGateway`] for each answer
pub struct GatewayResponder {
    id: String,
    spec: ParticipantSpec,
    pattern: Option<OutputPattern>,
    gateway: Arc<dyn LlmGateway>,
    memory: ResponderMemory,
    window: usize,
}

impl GatewayResponder {
    /// Build the `index`-th Responder from `spec`.
    pub fn new(
        spec: ParticipantSpec,
        index: usize,
        gateway: Arc<dyn LlmGateway>,
        window: usize,
    ) -> Result<Self, DomainError> {
        let pattern = spec.compile_pattern()?;
        Ok(Self {
            id: spec.participant_id(index),
            spec,
            pattern,
            gateway,
            memory: ResponderMemory::new(),
            window,
        })
    }
}

#[async_trait]
impl Responder for GatewayResponder {
    fn id(&self) -> &str {
        &self.id
    }

    async fn generate(&mut self, prompt: &str) -> Result<String, GatewayError> {
        let built = PromptTemplate::responder_prompt(&self.memory.render(self.window), prompt);
        let raw = self.gateway.ask(&self.spec.render(&built)).await?;

        let answer = match &self.pattern {
            Some(pattern) => pattern.extract(&raw).to_string(),
            None => raw,
        };
        debug!(
            "Responder {} answered ({} chars, memory {}): {}",
            self.id,
            answer.len(),
            self.memory.len() + 1,
            preview(&answer, 80)
        );

        self.memory.push(MemoryEntry::new(prompt, answer.clone()));
        Ok(answer)
    }

    fn context(&self) -> String {
        self.memory.render(self.window)
    }

    fn memory(&self) -> &ResponderMemory {
        &self.memory
    }

    fn reset_history(&mut self, memory: ResponderMemory) {
        self.memory = memory;
    }
}
