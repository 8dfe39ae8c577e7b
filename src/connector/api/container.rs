use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    AnalyzeContractUseCase, AnswerQuestionUseCase, CompletionClient, SessionStore,
};
use crate::domain::DomainError;
use crate::{
    AnthropicClient, ExpiryPolicy, InMemorySessionStore, MockCompletionClient, OpenAiClient,
};

/// Completion provider selected at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Anthropic,
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
        }
    }

    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "openai" | "gpt" => Ok(ProviderKind::OpenAi),
            unknown => Err(DomainError::config(format!(
                "unknown provider '{unknown}', expected 'anthropic' or 'openai'"
            ))),
        }
    }
}

pub struct ContainerConfig {
    pub provider: ProviderKind,
    /// Use the deterministic mock client instead of a real provider.
    pub mock_provider: bool,
    pub request_timeout: Duration,
    pub session_ttl: Option<Duration>,
    pub session_capacity: Option<usize>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            mock_provider: false,
            request_timeout: Duration::from_secs(30),
            session_ttl: None,
            session_capacity: None,
        }
    }
}

/// Wires the configured completion client and session store together and
/// hands out use cases to the HTTP controllers.
pub struct Container {
    completion_client: Arc<dyn CompletionClient>,
    session_store: Arc<dyn SessionStore>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let completion_client: Arc<dyn CompletionClient> = if config.mock_provider {
            debug!("Using mock completion client");
            Arc::new(MockCompletionClient::canned_analysis())
        } else {
            match config.provider {
                ProviderKind::Anthropic => {
                    debug!("Using Anthropic completion client");
                    Arc::new(AnthropicClient::from_env(config.request_timeout)?)
                }
                ProviderKind::OpenAi => {
                    debug!("Using OpenAI completion client");
                    Arc::new(OpenAiClient::from_env(config.request_timeout)?)
                }
            }
        };

        let mut policy = ExpiryPolicy::unbounded();
        if let Some(ttl) = config.session_ttl {
            policy = policy.with_ttl(ttl);
        }
        if let Some(capacity) = config.session_capacity {
            policy = policy.with_max_entries(capacity);
        }

        Ok(Self {
            completion_client,
            session_store: Arc::new(InMemorySessionStore::with_policy(policy)),
        })
    }

    /// Assemble from pre-built components (used by tests to inject stubs).
    pub fn with_components(
        completion_client: Arc<dyn CompletionClient>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            completion_client,
            session_store,
        }
    }

    pub fn analyze_use_case(&self) -> AnalyzeContractUseCase {
        AnalyzeContractUseCase::new(
            self.completion_client.clone(),
            self.session_store.clone(),
        )
    }

    pub fn ask_use_case(&self) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::new(
            self.completion_client.clone(),
            self.session_store.clone(),
        )
    }

    pub fn session_store(&self) -> Arc<dyn SessionStore> {
        self.session_store.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parsing() {
        assert_eq!(ProviderKind::parse("anthropic").unwrap(), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::parse("Claude").unwrap(), ProviderKind::Anthropic);
        assert_eq!(ProviderKind::parse("openai").unwrap(), ProviderKind::OpenAi);
        assert!(ProviderKind::parse("gemini").is_err());
    }

    #[test]
    fn test_mock_container_builds_without_keys() {
        let config = ContainerConfig {
            mock_provider: true,
            ..ContainerConfig::default()
        };

        assert!(Container::new(config).is_ok());
    }
}
