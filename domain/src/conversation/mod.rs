//! Conversation domain.
//!
//! - [`turn::ConversationTurn`] / [`turn::ConversationHistory`]: the shared,
//!   user-visible transcript of a session (one User/Bot pair per prompt)
//! - [`memory::ResponderMemory`]: a Responder's private memory, which also
//!   keeps every rejected draft

pub mod memory;
pub mod turn;

pub use memory::{DEFAULT_MEMORY_WINDOW, MemoryEntry, ResponderMemory};
pub use turn::{ConversationHistory, ConversationTurn, Speaker};
