//! Session cache limits.
//!
//! [`SessionLimits`] bounds how many sessions the
//! [`SessionManager`](crate::use_cases::session_manager::SessionManager)
//! keeps live in memory. Evicted sessions stay in the store and are
//! reloaded on next use.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Live-session cache limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLimits {
    /// Maximum number of sessions kept in memory.
    pub max_live: usize,
    /// Sessions unused for longer than this are dropped from memory.
    pub idle_ttl: Duration,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_live: 64,
            idle_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl SessionLimits {
    pub fn with_max_live(mut self, max: usize) -> Self {
        self.max_live = max;
        self
    }

    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = ttl;
        self
    }
}
