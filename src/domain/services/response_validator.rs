use crate::domain::{AnalysisResult, DomainError};

/// Validates raw completion text against the expected output contract.
///
/// Analysis output must parse into [`AnalysisResult`] exactly; anything else
/// fails with [`DomainError::MalformedOutput`] carrying the complete raw text
/// so an operator can inspect prompt drift. A malformed response is never
/// coerced into a default result.
pub struct ResponseValidator;

impl ResponseValidator {
    /// Parse and validate an analysis response.
    ///
    /// The model is instructed to return only a JSON object; text outside the
    /// outermost `{…}` block (prose, markdown code fences) is ignored to be
    /// resilient to minor formatting deviations. The object itself is parsed
    /// strictly: missing, mistyped, or extra fields fail validation.
    pub fn validate_analysis(response_text: &str) -> Result<AnalysisResult, DomainError> {
        let candidate = Self::extract_json_object(response_text).ok_or_else(|| {
            DomainError::malformed_output("no JSON object found in response", response_text)
        })?;

        let result: AnalysisResult = serde_json::from_str(candidate).map_err(|e| {
            DomainError::malformed_output(format!("invalid analysis JSON: {e}"), response_text)
        })?;

        if !result.risk_score_in_range() {
            return Err(DomainError::malformed_output(
                format!("riskScore {} outside the 1-10 range", result.risk_score()),
                response_text,
            ));
        }

        Ok(result)
    }

    /// QnA answers are prose: trim and return as-is.
    pub fn validate_answer(response_text: &str) -> String {
        response_text.trim().to_string()
    }

    /// Extract the outermost `{…}` block from the response.
    fn extract_json_object(text: &str) -> Option<&str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        (end >= start).then(|| &text[start..=end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = r#"{"riskScore":7,"highRiskClauses":["auto-renewal"],"missingClauses":["termination for convenience"],"explanationSummary":"Auto-renewal risk."}"#;

    #[test]
    fn validate_analysis_accepts_well_formed_json() {
        let result = ResponseValidator::validate_analysis(WELL_FORMED).unwrap();

        assert_eq!(result.risk_score(), 7);
        assert_eq!(result.high_risk_clauses(), ["auto-renewal"]);
        assert_eq!(result.missing_clauses(), ["termination for convenience"]);
        assert_eq!(result.explanation_summary(), "Auto-renewal risk.");
    }

    #[test]
    fn validate_analysis_tolerates_code_fences() {
        let text = format!("```json\n{WELL_FORMED}\n```");
        let result = ResponseValidator::validate_analysis(&text).unwrap();

        assert_eq!(result.risk_score(), 7);
    }

    #[test]
    fn validate_analysis_tolerates_surrounding_prose() {
        let text = format!("Here is the analysis you asked for:\n{WELL_FORMED}\nLet me know!");
        let result = ResponseValidator::validate_analysis(&text).unwrap();

        assert_eq!(result.risk_score(), 7);
    }

    #[test]
    fn validate_analysis_fails_on_non_json_with_raw_text() {
        let text = "I am unable to analyze this contract.";
        let err = ResponseValidator::validate_analysis(text).unwrap_err();

        assert!(err.is_malformed_output());
        assert_eq!(err.raw_output(), Some(text));
    }

    #[test]
    fn validate_analysis_fails_on_missing_field() {
        let text = r#"{"riskScore":7,"highRiskClauses":[],"missingClauses":[]}"#;
        let err = ResponseValidator::validate_analysis(text).unwrap_err();

        assert!(err.is_malformed_output());
        assert_eq!(err.raw_output(), Some(text));
    }

    #[test]
    fn validate_analysis_fails_on_mistyped_field() {
        let text = r#"{"riskScore":"high","highRiskClauses":[],"missingClauses":[],"explanationSummary":""}"#;

        assert!(ResponseValidator::validate_analysis(text).is_err());
    }

    #[test]
    fn validate_analysis_fails_on_extra_field() {
        let text = r#"{"riskScore":5,"highRiskClauses":[],"missingClauses":[],"explanationSummary":"ok","confidence":1.0}"#;

        assert!(ResponseValidator::validate_analysis(text).is_err());
    }

    #[test]
    fn validate_analysis_fails_on_out_of_range_score() {
        for score in [0, 11] {
            let text = format!(
                r#"{{"riskScore":{score},"highRiskClauses":[],"missingClauses":[],"explanationSummary":"x"}}"#
            );
            let err = ResponseValidator::validate_analysis(&text).unwrap_err();

            assert!(err.is_malformed_output(), "score {score} should be rejected");
        }
    }

    #[test]
    fn validate_analysis_fails_on_fractional_score() {
        let text = r#"{"riskScore":7.5,"highRiskClauses":[],"missingClauses":[],"explanationSummary":"x"}"#;

        assert!(ResponseValidator::validate_analysis(text).is_err());
    }

    #[test]
    fn validate_answer_trims_whitespace() {
        let answer = ResponseValidator::validate_answer("  The contract does not mention this.\n");

        assert_eq!(answer, "The contract does not mention this.");
    }
}
