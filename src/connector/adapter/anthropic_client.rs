use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// HTTP client for the Anthropic Messages API (and compatible endpoints).
///
/// Implements [`CompletionClient`] so orchestrators stay decoupled from
/// transport and serialization details. Each call is a single round trip
/// with no automatic retry; the request timeout is an explicit configuration
/// option rather than a hidden transport default.
///
/// Configuration via environment variables:
///
/// ```text
/// ANTHROPIC_API_KEY=sk-ant-...   (falls back to API_KEY)
/// ANTHROPIC_BASE_URL=https://api.anthropic.com
/// ANTHROPIC_MODEL=claude-3-sonnet-20240229
/// ```
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{MESSAGES_PATH}", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from environment variables. Fails when no API key is set:
    /// an unauthenticated cloud call would only fail later with a 401.
    pub fn from_env(timeout: Duration) -> Result<Self, DomainError> {
        let key = std::env::var("ANTHROPIC_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| DomainError::config("ANTHROPIC_API_KEY (or API_KEY) is not set"))?;
        let base =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(key, model, base, timeout))
    }

    /// Response text lives at `content[0].text` in the Messages API payload.
    fn extract_text(payload: &Value) -> Option<String> {
        payload
            .get("content")?
            .get(0)?
            .get("text")?
            .as_str()
            .map(str::to_string)
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn send_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, DomainError> {
        let body = ApiRequest {
            model: &self.model,
            max_tokens: request.max_tokens(),
            temperature: request.temperature(),
            system: request.system(),
            messages: vec![ApiMessage {
                role: "user",
                content: request.prompt(),
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("AnthropicClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let payload = response.text().await.unwrap_or_default();
            warn!("AnthropicClient: API returned {status}: {payload}");
            return Err(DomainError::provider_with_status(
                format!("AnthropicClient: API returned {status}"),
                status.as_u16(),
                payload,
            ));
        }

        let payload: Value = response.json().await.map_err(|e| {
            DomainError::provider(format!("AnthropicClient: failed to parse response: {e}"))
        })?;

        let text = Self::extract_text(&payload).ok_or_else(|| {
            DomainError::provider("AnthropicClient: response contained no text content")
        })?;

        Ok(CompletionResponse::new(text, payload))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_text_reads_first_content_block() {
        let payload = json!({
            "content": [{"type": "text", "text": "{\"riskScore\":3}"}],
            "model": "claude-3-sonnet-20240229",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        });

        assert_eq!(
            AnthropicClient::extract_text(&payload).as_deref(),
            Some("{\"riskScore\":3}")
        );
    }

    #[test]
    fn extract_text_rejects_empty_content() {
        let payload = json!({"content": []});

        assert!(AnthropicClient::extract_text(&payload).is_none());
    }

    #[test]
    fn request_serializes_messages_shape() {
        let body = ApiRequest {
            model: "claude-3-sonnet-20240229",
            max_tokens: 1000,
            temperature: 0.3,
            system: None,
            messages: vec![ApiMessage {
                role: "user",
                content: "prompt text",
            }],
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "claude-3-sonnet-20240229");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "prompt text");
        assert!(value.get("system").is_none());
    }

    #[test]
    fn endpoint_url_joins_base_without_double_slash() {
        let client = AnthropicClient::new(
            "key",
            "model",
            "http://localhost:1234/",
            Duration::from_secs(5),
        );

        assert_eq!(client.url, "http://localhost:1234/v1/messages");
    }
}
