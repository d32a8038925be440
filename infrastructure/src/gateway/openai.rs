//! OpenAI-compatible chat-completions gateway

use super::error::OpenAiError;
use async_trait::async_trait;
use lumin_application::{GatewayError, LlmGateway};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for a chat-completions endpoint
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Base URL, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            timeout: Duration::from_secs(120),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Stateless gateway: every `ask` is a single-message completion
pub struct OpenAiGateway {
    client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiGateway {
    pub fn new(settings: OpenAiSettings) -> Result<Self, OpenAiError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &OpenAiSettings {
        &self.settings
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, OpenAiError> {
        let mut request = self.client.post(self.endpoint()).json(&self.request_body(prompt));
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        parse_completion(&body)
    }
}

/// Extract the first choice's text from a chat-completions body.
fn parse_completion(body: &str) -> Result<String, OpenAiError> {
    let parsed: ChatResponse = serde_json::from_str(body)?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(OpenAiError::EmptyResponse)
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn ask(&self, prompt: &str) -> Result<String, GatewayError> {
        debug!(
            "Requesting completion from {} ({} chars)",
            self.settings.model,
            prompt.len()
        );
        self.complete(prompt).await.map_err(|e| {
            warn!("Completion request to {} failed: {}", self.settings.model, e);
            GatewayError::from(e)
        })
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port; returns the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}/v1")
    }

    fn gateway(base_url: String) -> OpenAiGateway {
        OpenAiGateway::new(OpenAiSettings {
            base_url,
            api_key: Some("test-key".to_string()),
            timeout: Duration::from_secs(5),
            ..OpenAiSettings::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_completion() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "Paris"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "Paris");
    }

    #[test]
    fn test_parse_completion_empty() {
        assert!(matches!(
            parse_completion(r#"{"choices": []}"#),
            Err(OpenAiError::EmptyResponse)
        ));
        assert!(matches!(
            parse_completion(r#"{"choices": [{"message": {"content": null}}]}"#),
            Err(OpenAiError::EmptyResponse)
        ));
        assert!(matches!(
            parse_completion("not json"),
            Err(OpenAiError::Parse(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let g = OpenAiGateway::new(OpenAiSettings {
            model: "local-model".to_string(),
            temperature: Some(0.2),
            ..OpenAiSettings::default()
        })
        .unwrap();

        let json = serde_json::to_value(g.request_body("hello")).unwrap();
        assert_eq!(json["model"], "local-model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
        assert!(json.get("max_tokens").is_none());
        assert!((json["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let g = gateway("http://localhost:8080/v1/".to_string());
        assert_eq!(g.endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_ask_success() {
        let base = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"choices": [{"message": {"role": "assistant", "content": "42"}}]}"#,
        )
        .await;

        assert_eq!(gateway(base).ask("meaning of life?").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn test_ask_rate_limited() {
        let base = serve_once(
            "HTTP/1.1 429 Too Many Requests",
            r#"{"error": "slow down"}"#,
        )
        .await;

        assert!(matches!(
            gateway(base).ask("hi").await,
            Err(GatewayError::RateLimited(body)) if body.contains("slow down")
        ));
    }

    #[test]
    fn test_model_name() {
        let g = gateway("http://localhost".to_string());
        assert_eq!(g.model_name(), "gpt-4o-mini");
    }
}
