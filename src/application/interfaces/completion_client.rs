use async_trait::async_trait;

use crate::domain::{CompletionRequest, CompletionResponse, DomainError};

/// An interface for sending a prompt to an LLM completion service and
/// receiving the response text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details, and normalize every provider's payload to the same
/// [`CompletionResponse`] shape so orchestrators remain provider-agnostic.
///
/// Each call is a single network round trip with no automatic retry; any
/// transport or API-level failure surfaces as [`DomainError::Provider`]
/// carrying the upstream status and payload when available.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn send_completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, DomainError>;

    /// The configured model identifier (for logging).
    fn model_name(&self) -> &str;
}
