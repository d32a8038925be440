//! Consensus participants
//!
//! The two roles of the protocol as traits, plus the single executor per
//! role that interprets a [`ParticipantSpec`](lumin_domain::ParticipantSpec)
//! against an [`LlmGateway`](crate::ports::llm_gateway::LlmGateway).
//!
//! | Role | Trait | Executor | State |
//! |------|-------|----------|-------|
//! | Responder | [`Responder`] | [`GatewayResponder`] | private memory |
//! | Reviewer | [`Reviewer`] | [`GatewayReviewer`] | stateless |

pub mod responder;
pub mod reviewer;

pub use responder::GatewayResponder;
pub use reviewer::GatewayReviewer;

use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use lumin_domain::{Ballot, ResponderMemory, Verdict};

/// Generates candidate answers and remembers every draft it produced
#[async_trait]
pub trait Responder: Send + Sync {
    fn id(&self) -> &str;

    /// Answer `prompt` in light of this Responder's memory.
    ///
    /// The (prompt, answer) pair is appended to memory before returning.
    /// Gateway failures propagate unchanged and leave memory untouched.
    async fn generate(&mut self, prompt: &str) -> Result<String, GatewayError>;

    /// Rendered memory window handed to Reviewers as candidate context
    fn context(&self) -> String;

    fn memory(&self) -> &ResponderMemory;

    /// Replace memory wholesale
    fn reset_history(&mut self, memory: ResponderMemory);
}

/// Judges candidates and votes among approved ones
#[async_trait]
pub trait Reviewer: Send + Sync {
    fn id(&self) -> &str;

    /// Judge one candidate; unparseable replies become a failing verdict.
    async fn review(
        &self,
        prompt: &str,
        candidate: &str,
        context: &str,
    ) -> Result<Verdict, GatewayError>;

    /// Pick the best of `candidates`; unparseable replies abstain.
    async fn vote(&self, prompt: &str, candidates: &[String]) -> Result<Ballot, GatewayError>;
}
