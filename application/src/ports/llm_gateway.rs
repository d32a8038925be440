//! LLM Gateway port
//!
//! Defines the interface for turning a prompt into generated text.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_) | GatewayError::RateLimited(_) | GatewayError::Timeout
        )
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer requests generated text.
/// Every call is independent: conversation state lives in the participants,
/// not in the gateway. Implementations (adapters) live in the infrastructure
/// layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a prompt and return the generated text
    async fn ask(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Human-readable name of the backing model, for logs
    fn model_name(&self) -> &str {
        "unknown"
    }
}
