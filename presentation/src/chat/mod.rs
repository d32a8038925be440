//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface bound to one session.

mod repl;

pub use repl::{ChatRepl, ProgressMode};
