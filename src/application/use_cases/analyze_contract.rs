use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::application::use_cases::prompts::PromptBuilder;
use crate::application::{CompletionClient, SessionStore};
use crate::domain::{AnalysisResult, CompletionRequest, DomainError, ResponseValidator};

/// Outcome of a successful analysis: the validated result plus the session
/// registered for follow-up questions.
#[derive(Debug, Clone)]
pub struct ContractAnalysis {
    session_id: String,
    result: AnalysisResult,
}

impl ContractAnalysis {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn result(&self) -> &AnalysisResult {
        &self.result
    }

    pub fn into_parts(self) -> (String, AnalysisResult) {
        (self.session_id, self.result)
    }
}

pub struct AnalyzeContractUseCase {
    completion_client: Arc<dyn CompletionClient>,
    session_store: Arc<dyn SessionStore>,
}

impl AnalyzeContractUseCase {
    pub fn new(
        completion_client: Arc<dyn CompletionClient>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            completion_client,
            session_store,
        }
    }

    pub async fn execute(&self, document_text: &str) -> Result<ContractAnalysis, DomainError> {
        if document_text.trim().is_empty() {
            return Err(DomainError::invalid_input("contract document is empty"));
        }

        info!(
            "Analyzing contract ({} chars) with {}",
            document_text.len(),
            self.completion_client.model_name()
        );
        let start_time = Instant::now();

        let prompt = PromptBuilder::build_analysis_prompt(document_text);
        let request = CompletionRequest::new(prompt);
        let response = self.completion_client.send_completion(&request).await?;

        // Register the session only after validation succeeds: a malformed
        // analysis must not anchor a QnA session.
        let result = ResponseValidator::validate_analysis(response.text())?;
        let session = self.session_store.create(document_text.to_string()).await?;

        info!(
            "Analysis complete in {:.2}s: {} (session {})",
            start_time.elapsed().as_secs_f64(),
            result.summary(),
            session.id()
        );

        Ok(ContractAnalysis {
            session_id: session.id().to_string(),
            result,
        })
    }
}
