//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod run_consensus;
pub mod session_manager;
