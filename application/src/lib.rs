//! Application layer for lumin
//!
//! This crate contains use cases, port definitions, participant executors
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod participants;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionLimits;
pub use participants::{GatewayResponder, GatewayReviewer, Responder, Reviewer};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{ConsensusProgressNotifier, NoProgress},
    session_store::{SessionStore, StoreError},
};
pub use session::{ConsensusSession, SessionInfo};
pub use use_cases::run_consensus::{ConsensusError, ConsensusOrchestrator};
pub use use_cases::session_manager::{SessionError, SessionManager};
