//! Application-level configuration.
//!
//! - [`SessionLimits`]: live-session cache bounds for the session manager

pub mod session_limits;

pub use session_limits::SessionLimits;
