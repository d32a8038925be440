//! Error types for the OpenAI-compatible adapter

use lumin_application::GatewayError;
use thiserror::Error;

/// Errors that can occur when talking to a chat-completions endpoint
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response contained no choices")]
    EmptyResponse,

    #[error("Missing API key (set {env_var} or gateway.api_key)")]
    MissingApiKey { env_var: String },
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            OpenAiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            OpenAiError::Status { status: 429, body } => GatewayError::RateLimited(body),
            OpenAiError::Status { status: 404, body } => GatewayError::ModelNotAvailable(body),
            OpenAiError::Status {
                status: 408 | 504, ..
            } => GatewayError::Timeout,
            err @ OpenAiError::Status { .. } => GatewayError::RequestFailed(err.to_string()),
            err @ (OpenAiError::Parse(_) | OpenAiError::EmptyResponse) => {
                GatewayError::InvalidResponse(err.to_string())
            }
            err @ OpenAiError::MissingApiKey { .. } => GatewayError::Other(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> OpenAiError {
        OpenAiError::Status {
            status,
            body: "body".to_string(),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::from(status(429)),
            GatewayError::RateLimited("body".to_string())
        );
        assert_eq!(
            GatewayError::from(status(404)),
            GatewayError::ModelNotAvailable("body".to_string())
        );
        assert_eq!(GatewayError::from(status(504)), GatewayError::Timeout);
        assert!(matches!(
            GatewayError::from(status(500)),
            GatewayError::RequestFailed(msg) if msg.contains("500")
        ));
    }

    #[test]
    fn test_empty_response_is_invalid() {
        assert!(matches!(
            GatewayError::from(OpenAiError::EmptyResponse),
            GatewayError::InvalidResponse(_)
        ));
    }
}
