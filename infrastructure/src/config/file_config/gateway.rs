//! Gateway configuration from TOML (`[gateway]` section)

use crate::gateway::OpenAiSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI-compatible endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Base URL of the chat-completions API (can point at a local server).
    pub base_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        let defaults = OpenAiSettings::default();
        Self {
            base_url: defaults.base_url,
            model: defaults.model,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            timeout_secs: defaults.timeout.as_secs(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl FileGatewayConfig {
    /// Explicit key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.is_empty())
    }

    pub fn to_settings(&self) -> OpenAiSettings {
        OpenAiSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.resolve_api_key(),
            timeout: Duration::from_secs(self.timeout_secs),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}
