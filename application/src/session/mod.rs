//! Live consensus sessions
//!
//! - [`ConsensusSession`]: participants, shared history and config of one
//!   conversation
//! - [`SessionInfo`]: summary returned by the session manager

mod consensus_session;

pub use consensus_session::{ConsensusSession, SessionInfo};
