use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// HTTP client for the OpenAI chat-completions API (and compatible endpoints).
///
/// The chat API has no top-level system field; an optional system instruction
/// is sent as a leading `system` role message instead. The response text is
/// normalized from `choices[0].message.content` so orchestrators see the same
/// [`CompletionResponse`] shape as with any other provider.
///
/// Configuration via environment variables:
///
/// ```text
/// OPENAI_API_KEY=sk-...          (falls back to API_KEY)
/// OPENAI_BASE_URL=https://api.openai.com
/// OPENAI_MODEL=gpt-4o
/// ```
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + CHAT_COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{CHAT_COMPLETIONS_PATH}", base.trim_end_matches('/'));
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

    pub fn from_env(timeout: Duration) -> Result<Self, DomainError> {
        let key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .map_err(|_| DomainError::config("OPENAI_API_KEY (or API_KEY) is not set"))?;
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(key, model, base, timeout))
    }

    /// Response text lives at `choices[0].message.content` in the chat payload.
    fn extract_text(payload: &Value) -> Option<String> {
        payload
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?
            .as_str()
            .map(str::to_string)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn send_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, DomainError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system() {
            messages.push(ApiMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ApiMessage {
            role: "user",
            content: request.prompt(),
        });

        let body = ApiRequest {
            model: &self.model,
            max_tokens: request.max_tokens(),
            temperature: request.temperature(),
            messages,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("OpenAiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let payload = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {payload}");
            return Err(DomainError::provider_with_status(
                format!("OpenAiClient: API returned {status}"),
                status.as_u16(),
                payload,
            ));
        }

        let payload: Value = response.json().await.map_err(|e| {
            DomainError::provider(format!("OpenAiClient: failed to parse response: {e}"))
        })?;

        let text = Self::extract_text(&payload).ok_or_else(|| {
            DomainError::provider("OpenAiClient: response contained no text content")
        })?;

        Ok(CompletionResponse::new(text, payload))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
