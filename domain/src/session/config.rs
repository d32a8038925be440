//! Session configuration

use crate::config::{ConfigIssue, ConfigIssueCode};
use crate::consensus::{DEFAULT_MAX_ROUNDS, ExhaustionPolicy};
use crate::conversation::DEFAULT_MEMORY_WINDOW;
use crate::core::error::DomainError;
use crate::participant::{ParticipantRole, ParticipantSpec};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RESPONDERS: usize = 3;
pub const DEFAULT_REVIEWERS: usize = 1;

/// Shape of a consensus session, fixed when the session is created
///
/// # Example
///
/// ```
/// use lumin_domain::SessionConfig;
///
/// let config = SessionConfig::new(2, 3).with_max_rounds(4);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_rounds, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of Responders (≥ 1)
    pub responders: usize,
    /// Number of Reviewers (0 means every candidate is approved)
    pub reviewers: usize,
    /// Refinement rounds allowed before the budget is exhausted
    pub max_rounds: usize,
    /// Memory entries each Responder sees when generating
    pub memory_window: usize,
    pub on_exhaustion: ExhaustionPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder: Option<ParticipantSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<ParticipantSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            responders: DEFAULT_RESPONDERS,
            reviewers: DEFAULT_REVIEWERS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            memory_window: DEFAULT_MEMORY_WINDOW,
            on_exhaustion: ExhaustionPolicy::default(),
            responder: None,
            reviewer: None,
        }
    }
}

impl SessionConfig {
    pub fn new(responders: usize, reviewers: usize) -> Self {
        Self {
            responders,
            reviewers,
            ..Self::default()
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_memory_window(mut self, window: usize) -> Self {
        self.memory_window = window;
        self
    }

    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.on_exhaustion = policy;
        self
    }

    pub fn strict(self) -> Self {
        self.with_exhaustion_policy(ExhaustionPolicy::Reject)
    }

    pub fn with_responder_spec(mut self, spec: ParticipantSpec) -> Self {
        self.responder = Some(spec);
        self
    }

    pub fn with_reviewer_spec(mut self, spec: ParticipantSpec) -> Self {
        self.reviewer = Some(spec);
        self
    }

    /// Responder spec, falling back to the role default
    pub fn responder_spec(&self) -> ParticipantSpec {
        self.responder
            .clone()
            .unwrap_or_else(|| ParticipantSpec::for_role(ParticipantRole::Responder))
    }

    /// Reviewer spec, falling back to the role default
    pub fn reviewer_spec(&self) -> ParticipantSpec {
        self.reviewer
            .clone()
            .unwrap_or_else(|| ParticipantSpec::for_role(ParticipantRole::Reviewer))
    }

    /// Check that a session can be built from this configuration.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.responders == 0 {
            return Err(DomainError::InvalidConfig(
                "at least one responder is required".to_string(),
            ));
        }
        if let Some(spec) = &self.responder {
            spec.validate()?;
        }
        if let Some(spec) = &self.reviewer {
            spec.validate()?;
        }
        Ok(())
    }

    /// Every problem with this configuration, errors and warnings alike
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.responders == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoResponders,
                "consensus.responders must be at least 1",
            ));
        }
        if self.reviewers == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoReviewers,
                "consensus.reviewers is 0: every candidate will be accepted unreviewed",
            ));
        }
        if self.max_rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoRefinement,
                "consensus.max_rounds is 0: rejected answers are never refined",
            ));
        }
        if self.memory_window == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyMemoryWindow,
                "consensus.memory_window is 0: responders will not see earlier exchanges",
            ));
        }

        for (section, spec) in [("responder", &self.responder), ("reviewer", &self.reviewer)] {
            let Some(spec) = spec else { continue };
            match spec.validate() {
                Ok(()) => {}
                Err(e @ DomainError::InvalidPattern { .. }) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidOutputPattern,
                    format!("consensus.{section}.output_pattern: {e}"),
                )),
                Err(e) => issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyParticipantId,
                    format!("consensus.{section}: {e}"),
                )),
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.responders, 3);
        assert_eq!(config.reviewers, 1);
        assert_eq!(config.max_rounds, 6);
        assert_eq!(config.memory_window, 20);
        assert_eq!(config.on_exhaustion, ExhaustionPolicy::Accept);
        assert!(config.validate().is_ok());
        assert!(config.issues().is_empty());
    }

    #[test]
    fn test_zero_responders_rejected() {
        let config = SessionConfig::new(0, 1);
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidConfig(_))
        ));
        assert!(config.issues().iter().any(|i| i.is_error()));
    }

    #[test]
    fn test_zero_reviewers_allowed_with_warning() {
        let config = SessionConfig::new(2, 0);
        assert!(config.validate().is_ok());
        let issues = config.issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::NoReviewers);
        assert!(!issues[0].is_error());
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let config = SessionConfig::default()
            .with_reviewer_spec(ParticipantSpec::new("judge").with_output_pattern("[oops"));
        assert!(matches!(
            config.validate(),
            Err(DomainError::InvalidPattern { .. })
        ));
        assert_eq!(
            config.issues()[0].code,
            ConfigIssueCode::InvalidOutputPattern
        );
    }

    #[test]
    fn test_spec_fallbacks() {
        let config = SessionConfig::default();
        assert_eq!(config.responder_spec().id, "responder");
        assert_eq!(config.reviewer_spec().id, "reviewer");

        let config = config.with_responder_spec(ParticipantSpec::new("poet"));
        assert_eq!(config.responder_spec().id, "poet");
        assert_eq!(config.reviewer_spec().id, "reviewer");
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"responders": 2, "on_exhaustion": "reject"}"#).unwrap();
        assert_eq!(config.responders, 2);
        assert_eq!(config.reviewers, 1);
        assert!(config.on_exhaustion.is_strict());
    }
}
