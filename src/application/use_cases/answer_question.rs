use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::application::use_cases::prompts::PromptBuilder;
use crate::application::{CompletionClient, SessionStore};
use crate::domain::{CompletionRequest, DomainError, ResponseValidator};

pub struct AnswerQuestionUseCase {
    completion_client: Arc<dyn CompletionClient>,
    session_store: Arc<dyn SessionStore>,
}

impl AnswerQuestionUseCase {
    pub fn new(
        completion_client: Arc<dyn CompletionClient>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            completion_client,
            session_store,
        }
    }

    pub async fn execute(&self, session_id: &str, question: &str) -> Result<String, DomainError> {
        if question.trim().is_empty() {
            return Err(DomainError::invalid_input("question is empty"));
        }

        let session = self.session_store.get(session_id).await?;

        info!(
            "Answering question against session {} with {}",
            session.id(),
            self.completion_client.model_name()
        );
        let start_time = Instant::now();

        let prompt = PromptBuilder::build_qna_prompt(session.document_text(), question);
        let request = CompletionRequest::new(prompt);
        let response = self.completion_client.send_completion(&request).await?;

        let answer = ResponseValidator::validate_answer(response.text());

        info!(
            "Answer produced in {:.2}s ({} chars)",
            start_time.elapsed().as_secs_f64(),
            answer.len()
        );

        Ok(answer)
    }
}
