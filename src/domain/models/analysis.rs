use serde::{Deserialize, Serialize};

/// Structured risk analysis produced by the model for one contract.
///
/// The field set is the wire contract: the model is instructed to return
/// exactly these four fields and nothing else, so deserialization rejects
/// unknown fields instead of dropping them silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalysisResult {
    risk_score: u8,
    high_risk_clauses: Vec<String>,
    missing_clauses: Vec<String>,
    explanation_summary: String,
}

impl AnalysisResult {
    pub fn new(
        risk_score: u8,
        high_risk_clauses: Vec<String>,
        missing_clauses: Vec<String>,
        explanation_summary: String,
    ) -> Self {
        Self {
            risk_score,
            high_risk_clauses,
            missing_clauses,
            explanation_summary,
        }
    }

    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn high_risk_clauses(&self) -> &[String] {
        &self.high_risk_clauses
    }

    pub fn missing_clauses(&self) -> &[String] {
        &self.missing_clauses
    }

    pub fn explanation_summary(&self) -> &str {
        &self.explanation_summary
    }

    /// Whether the score falls in the instructed 1-10 range.
    pub fn risk_score_in_range(&self) -> bool {
        (1..=10).contains(&self.risk_score)
    }

    pub fn is_high_risk(&self) -> bool {
        self.risk_score >= 7
    }

    pub fn summary(&self) -> String {
        format!(
            "risk {}/10, {} high-risk clauses, {} missing clauses",
            self.risk_score,
            self.high_risk_clauses.len(),
            self.missing_clauses.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let result = AnalysisResult::new(
            7,
            vec!["auto-renewal".to_string()],
            vec!["termination for convenience".to_string()],
            "Auto-renewal risk.".to_string(),
        );

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["riskScore"], 7);
        assert_eq!(json["highRiskClauses"][0], "auto-renewal");
        assert_eq!(json["missingClauses"][0], "termination for convenience");
        assert_eq!(json["explanationSummary"], "Auto-renewal risk.");
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let json = r#"{
            "riskScore": 5,
            "highRiskClauses": [],
            "missingClauses": [],
            "explanationSummary": "ok",
            "confidence": 0.9
        }"#;

        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn test_risk_score_range_check() {
        let in_range = AnalysisResult::new(1, vec![], vec![], String::new());
        let out_of_range = AnalysisResult::new(0, vec![], vec![], String::new());

        assert!(in_range.risk_score_in_range());
        assert!(!out_of_range.risk_score_in_range());
    }

    #[test]
    fn test_high_risk_threshold() {
        assert!(AnalysisResult::new(7, vec![], vec![], String::new()).is_high_risk());
        assert!(!AnalysisResult::new(6, vec![], vec![], String::new()).is_high_risk());
    }
}
