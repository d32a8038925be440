//! Retry budget policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of refinement rounds before the budget is exhausted
pub const DEFAULT_MAX_ROUNDS: usize = 6;

/// What to do when the retry budget runs out with no approved candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Treat every candidate of the last round as approved (lenient)
    #[default]
    Accept,
    /// Fail the invocation (strict)
    Reject,
}

impl ExhaustionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExhaustionPolicy::Accept => "accept",
            ExhaustionPolicy::Reject => "reject",
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, ExhaustionPolicy::Reject)
    }
}

impl fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExhaustionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" | "lenient" => Ok(ExhaustionPolicy::Accept),
            "reject" | "strict" => Ok(ExhaustionPolicy::Reject),
            other => Err(format!(
                "Unknown exhaustion policy '{other}', expected 'accept' or 'reject'"
            )),
        }
    }
}
