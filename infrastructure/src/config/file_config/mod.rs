//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod gateway;
mod logging;
mod output;
mod repl;
mod sessions;

pub use gateway::FileGatewayConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use repl::FileReplConfig;
pub use sessions::FileSessionsConfig;

use lumin_domain::{ConfigIssue, ConfigIssueCode, SessionConfig};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Defaults for new sessions
    pub consensus: SessionConfig,
    /// Generation endpoint
    pub gateway: FileGatewayConfig,
    /// Session storage and cache limits
    pub sessions: FileSessionsConfig,
    /// Conversation transcript
    pub logging: FileLoggingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.consensus.issues();

        if self.gateway.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidGateway,
                "gateway.base_url cannot be empty",
            ));
        }
        if self.gateway.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidGateway,
                "gateway.model cannot be empty",
            ));
        }
        if self.gateway.timeout_secs == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidGateway,
                "gateway.timeout_secs cannot be 0",
            ));
        }
        if self.gateway.resolve_api_key().is_none() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::MissingApiKey,
                format!(
                    "no API key found in gateway.api_key or ${}; requests are sent unauthenticated",
                    self.gateway.api_key_env
                ),
            ));
        }

        if self.sessions.max_live == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidSessionLimits,
                "sessions.max_live must be at least 1",
            ));
        }

        issues
    }

    /// Whether any issue is severe enough to refuse to start
    pub fn has_errors(&self) -> bool {
        self.validate().iter().any(ConfigIssue::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumin_domain::ExhaustionPolicy;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[consensus]
responders = 4
reviewers = 2
max_rounds = 3
on_exhaustion = "reject"

[consensus.reviewer]
id = "judge"
output_pattern = '\{.*\}'

[gateway]
model = "gpt-4o"
api_key = "sk-test"

[logging]
conversation_log = "/tmp/lumin.jsonl"

[output]
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.responders, 4);
        assert_eq!(config.consensus.reviewers, 2);
        assert_eq!(config.consensus.max_rounds, 3);
        assert_eq!(config.consensus.memory_window, 20);
        assert_eq!(config.consensus.on_exhaustion, ExhaustionPolicy::Reject);
        assert_eq!(config.consensus.reviewer_spec().id, "judge");
        assert_eq!(config.gateway.model, "gpt-4o");
        assert!(config.logging.conversation_log.is_some());
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.consensus, SessionConfig::default());
        assert!(config.logging.conversation_log.is_none());
        assert!(config.output.color);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_validate_collects_errors() {
        let toml_str = r#"
[consensus]
responders = 0

[consensus.responder]
id = "r"
output_pattern = "(unclosed"

[gateway]
api_key = "sk"
timeout_secs = 0

[sessions]
max_live = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let codes: Vec<ConfigIssueCode> = config.validate().iter().map(|i| i.code).collect();

        assert!(codes.contains(&ConfigIssueCode::NoResponders));
        assert!(codes.contains(&ConfigIssueCode::InvalidOutputPattern));
        assert!(codes.contains(&ConfigIssueCode::InvalidGateway));
        assert!(codes.contains(&ConfigIssueCode::InvalidSessionLimits));
        assert!(config.has_errors());
    }

    #[test]
    fn test_missing_key_is_only_a_warning() {
        let config = FileConfig {
            gateway: FileGatewayConfig {
                api_key_env: "LUMIN_TEST_SURELY_UNSET_KEY_VAR".to_string(),
                ..FileGatewayConfig::default()
            },
            ..FileConfig::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::MissingApiKey);
        assert!(!config.has_errors());
    }
}
