//! Domain layer for lumin
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consensus
//!
//! A prompt is answered by several **Responders** in parallel. Every
//! candidate is judged by every **Reviewer**; a candidate survives only with
//! unanimous approval. Rejected drafts are refined with the reviewers'
//! reasons until something is approved or the retry budget runs out. When
//! several candidates survive, the Reviewers vote and the lowest index wins
//! ties.
//!
//! ## Conversation
//!
//! - **Shared history**: one User/Bot turn pair per answered prompt
//! - **Responder memory**: every draft a Responder produced, rejected or not

pub mod config;
pub mod consensus;
pub mod conversation;
pub mod core;
pub mod participant;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use consensus::{
    Ballot, ConsensusOutcome, DEFAULT_MAX_ROUNDS, ExhaustionPolicy, Round, SUPERVISOR_FAILED_REASON,
    Verdict, VoteTally, parse_ballot, parse_verdict, parse_verdict_or_reject,
};
pub use conversation::{
    ConversationHistory, ConversationTurn, DEFAULT_MEMORY_WINDOW, MemoryEntry, ResponderMemory,
    Speaker,
};
pub use core::{error::DomainError, prompt::Prompt};
pub use participant::{OutputPattern, ParticipantRole, ParticipantSpec};
pub use prompt::PromptTemplate;
pub use session::{ResponderSnapshot, SessionConfig, SessionKey, SessionSnapshot};
