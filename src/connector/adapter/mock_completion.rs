use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

enum MockBehavior {
    Respond(String),
    FailProvider {
        status: Option<u16>,
        message: String,
    },
}

/// Deterministic [`CompletionClient`] for tests and `--mock-provider` runs.
///
/// Records the last request so tests can assert on the prompt that reached
/// the provider boundary.
pub struct MockCompletionClient {
    behavior: MockBehavior,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletionClient {
    /// Respond to every completion with the given text.
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Respond(text.into()),
            last_request: Mutex::new(None),
        }
    }

    /// Fail every completion as a transport-level provider error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::FailProvider {
                status: None,
                message: message.into(),
            },
            last_request: Mutex::new(None),
        }
    }

    /// Fail every completion as an API-level provider error with a status.
    pub fn failing_with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::FailProvider {
                status: Some(status),
                message: message.into(),
            },
            last_request: Mutex::new(None),
        }
    }

    /// A plausible well-formed analysis, for running the service without a
    /// provider key.
    pub fn canned_analysis() -> Self {
        let canned = json!({
            "riskScore": 4,
            "highRiskClauses": ["unilateral amendment"],
            "missingClauses": ["limitation of liability"],
            "explanationSummary": "Mock analysis produced without calling a provider."
        });
        Self::returning(canned.to_string())
    }

    /// The most recent request seen by this client, if any.
    pub async fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().await.clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn send_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, DomainError> {
        *self.last_request.lock().await = Some(request.clone());

        match &self.behavior {
            MockBehavior::Respond(text) => {
                debug!("MockCompletionClient returning {} chars", text.len());
                Ok(CompletionResponse::new(
                    text.clone(),
                    json!({"mock": true, "text": text}),
                ))
            }
            MockBehavior::FailProvider { status, message } => Err(match status {
                Some(status) => {
                    DomainError::provider_with_status(message.clone(), *status, String::new())
                }
                None => DomainError::provider(message.clone()),
            }),
        }
    }

    fn model_name(&self) -> &str {
        "mock-completion"
    }
}
