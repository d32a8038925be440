//! Participant domain
//!
//! Responders and Reviewers are plain data ([`ParticipantSpec`]) interpreted
//! by one fixed executor per role in the application layer.

pub mod spec;

pub use spec::{INPUT_PLACEHOLDER, OutputPattern, ParticipantRole, ParticipantSpec};
