//! Consensus session domain.
//!
//! - [`config::SessionConfig`]: participant counts and budget, fixed at creation
//! - [`key::SessionKey`]: opaque session identifier
//! - [`snapshot::SessionSnapshot`]: persisted form of a session

pub mod config;
pub mod key;
pub mod snapshot;

pub use config::{DEFAULT_RESPONDERS, DEFAULT_REVIEWERS, SessionConfig};
pub use key::SessionKey;
pub use snapshot::{ResponderSnapshot, SessionSnapshot};
