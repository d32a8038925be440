//! Configuration validation issues
//!
//! Validation never aborts on the first problem; it collects structured
//! issues with severity levels so callers can print all of them.
//!
//! # Examples
//!
//! ```
//! use lumin_domain::SessionConfig;
//!
//! let issues = SessionConfig::default().issues();
//! assert!(issues.is_empty());
//! ```

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No Responders: nothing would ever be generated.
    NoResponders,
    /// No Reviewers: every candidate is approved vacuously.
    NoReviewers,
    /// `max_rounds = 0`: rejected drafts are never refined.
    NoRefinement,
    /// `memory_window = 0`: Responders never see prior exchanges.
    EmptyMemoryWindow,
    /// A participant spec has an empty id.
    EmptyParticipantId,
    /// A participant output pattern does not compile.
    InvalidOutputPattern,
    /// Gateway settings cannot produce a working client.
    InvalidGateway,
    /// No API key could be found for the gateway.
    MissingApiKey,
    /// Session cache limits are unusable.
    InvalidSessionLimits,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}
