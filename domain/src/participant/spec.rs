//! Participant specifications

use crate::core::error::DomainError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder replaced by the built prompt inside a custom template
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Role a participant plays in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Responder,
    Reviewer,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Responder => "responder",
            ParticipantRole::Reviewer => "reviewer",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declarative description of a participant
///
/// - `template`: optional wrapper around the built prompt. `{input}` marks
///   where the built prompt goes; a template without it is prepended.
/// - `output_pattern`: optional regex; the first match in the raw reply is
///   used instead of the whole reply.
///
/// # Example
///
/// ```
/// use lumin_domain::participant::ParticipantSpec;
///
/// let spec = ParticipantSpec::new("responder")
///     .with_template("You are terse.\n{input}");
/// assert_eq!(spec.render("What is 2+2?"), "You are terse.\nWhat is 2+2?");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSpec {
    /// Base identity; executors suffix it with their position
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_pattern: Option<String>,
}

impl ParticipantSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            template: None,
            output_pattern: None,
        }
    }

    /// Default specification for a role
    pub fn for_role(role: ParticipantRole) -> Self {
        Self::new(role.as_str())
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_output_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.output_pattern = Some(pattern.into());
        self
    }

    /// Identity of the `index`-th participant built from this spec
    pub fn participant_id(&self, index: usize) -> String {
        format!("{}-{}", self.id, index)
    }

    /// Wrap a built prompt in this participant's template.
    pub fn render(&self, input: &str) -> String {
        match &self.template {
            None => input.to_string(),
            Some(t) if t.contains(INPUT_PLACEHOLDER) => t.replace(INPUT_PLACEHOLDER, input),
            Some(t) => format!("{t}\n\n{input}"),
        }
    }

    /// Compile the output pattern, if any.
    pub fn compile_pattern(&self) -> Result<Option<OutputPattern>, DomainError> {
        self.output_pattern
            .as_deref()
            .map(OutputPattern::new)
            .transpose()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "participant id cannot be empty".to_string(),
            ));
        }
        self.compile_pattern()?;
        Ok(())
    }
}

/// Compiled output-matching pattern (dot matches newline)
#[derive(Debug, Clone)]
pub struct OutputPattern {
    regex: Regex,
}

impl OutputPattern {
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        let regex = RegexBuilder::new(pattern)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| DomainError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// First match in `raw`, or `raw` itself when nothing matches.
    pub fn extract<'a>(&self, raw: &'a str) -> &'a str {
        self.regex.find(raw).map(|m| m.as_str()).unwrap_or(raw)
    }
}
