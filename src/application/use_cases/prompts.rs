//! Prompt construction for the analysis and question-answering tasks.
//!
//! The analysis prompt's wording is part of the output contract: it is the
//! only mechanism forcing the model to emit the exact four-field JSON object
//! the validator expects, so it must not be loosened. Document text is
//! embedded verbatim with no escaping; injected text altering model behavior
//! is a known, accepted limitation.

/// Exact sentence the model must return when the contract lacks the answer.
pub const NO_ANSWER_FALLBACK: &str = "The contract does not mention this.";

pub struct PromptBuilder;

impl PromptBuilder {
    /// Render the instruction prompt for the structured risk analysis task.
    pub fn build_analysis_prompt(document_text: &str) -> String {
        format!(
            r#"You are a legal contract analysis assistant.

Your job is to read the following contract text and return a JSON object with the following fields:

{{
  "riskScore": an integer from 1 to 10,
  "highRiskClauses": [list of dangerous clauses],
  "missingClauses": [standard clauses not present],
  "explanationSummary": "short explanation of key risks in plain English"
}}

Only return valid JSON and nothing else.

Contract Text:
{document_text}
"#
        )
    }

    /// Render the instruction prompt for a follow-up question against a
    /// previously analyzed contract.
    pub fn build_qna_prompt(document_text: &str, question: &str) -> String {
        format!(
            r#"You are a legal contract analysis assistant.

Answer the question below using only the contract text that follows. If the contract does not contain the information needed to answer, reply with exactly this sentence and nothing else: "{NO_ANSWER_FALLBACK}"

Question:
{question}

Contract Text:
{document_text}
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_names_every_result_field() {
        let prompt = PromptBuilder::build_analysis_prompt("Some contract.");

        assert!(prompt.contains("riskScore"));
        assert!(prompt.contains("highRiskClauses"));
        assert!(prompt.contains("missingClauses"));
        assert!(prompt.contains("explanationSummary"));
        assert!(prompt.contains("1 to 10"));
        assert!(prompt.contains("Only return valid JSON and nothing else."));
    }

    #[test]
    fn analysis_prompt_embeds_document_verbatim() {
        let document = "This Agreement auto-renews unless cancelled 90 days prior.";
        let prompt = PromptBuilder::build_analysis_prompt(document);

        assert!(prompt.contains(document));
    }

    #[test]
    fn analysis_prompt_is_deterministic() {
        let a = PromptBuilder::build_analysis_prompt("doc");
        let b = PromptBuilder::build_analysis_prompt("doc");

        assert_eq!(a, b);
    }

    #[test]
    fn qna_prompt_embeds_question_and_document() {
        let prompt =
            PromptBuilder::build_qna_prompt("Full contract text.", "What is the governing law?");

        assert!(prompt.contains("What is the governing law?"));
        assert!(prompt.contains("Full contract text."));
        assert!(prompt.contains(NO_ANSWER_FALLBACK));
    }
}
