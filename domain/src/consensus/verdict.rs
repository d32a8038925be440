//! Reviewer verdicts

use serde::{Deserialize, Serialize};

/// Reason recorded when a Reviewer's reply cannot be understood
pub const SUPERVISOR_FAILED_REASON: &str = "Supervisor failed";

/// A Reviewer's judgment of a single candidate answer
///
/// # Example
///
/// ```
/// use lumin_domain::consensus::Verdict;
///
/// let ok = Verdict::approve();
/// assert!(ok.correct);
///
/// let failed = Verdict::supervisor_failed();
/// assert!(!failed.correct);
/// assert_eq!(failed.reason, "Supervisor failed");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the candidate is correct and appropriate
    pub correct: bool,
    /// Why the candidate was rejected (empty on approval)
    #[serde(default)]
    pub reason: String,
}

impl Verdict {
    pub fn new(correct: bool, reason: impl Into<String>) -> Self {
        Self {
            correct,
            reason: reason.into(),
        }
    }

    pub fn approve() -> Self {
        Self::new(true, "")
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self::new(false, reason)
    }

    /// The fail-closed verdict used when a review reply is unparseable
    pub fn supervisor_failed() -> Self {
        Self::reject(SUPERVISOR_FAILED_REASON)
    }

    /// Whether this is the fail-closed placeholder rather than a real judgment
    pub fn is_supervisor_failure(&self) -> bool {
        !self.correct && self.reason == SUPERVISOR_FAILED_REASON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(Verdict::approve(), Verdict::new(true, ""));
        let rejected = Verdict::reject("off topic");
        assert!(!rejected.correct);
        assert_eq!(rejected.reason, "off topic");
    }

    #[test]
    fn test_supervisor_failure_detection() {
        assert!(Verdict::supervisor_failed().is_supervisor_failure());
        assert!(!Verdict::reject("wrong").is_supervisor_failure());
        assert!(!Verdict::approve().is_supervisor_failure());
    }

    #[test]
    fn test_reason_defaults_to_empty() {
        let verdict: Verdict = serde_json::from_str(r#"{"correct": true}"#).unwrap();
        assert_eq!(verdict, Verdict::approve());
    }
}
