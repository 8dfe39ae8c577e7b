pub mod analyze_controller;
pub mod ask_controller;

pub use analyze_controller::analyze;
pub use ask_controller::ask;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

pub async fn liveness() -> &'static str {
    "contractscan is running"
}

/// Map a domain failure onto the HTTP error contract.
///
/// Malformed model output echoes the raw text so a caller can manually
/// recover the content; provider failures deliberately collapse to a fixed
/// message (the upstream payload is already logged).
pub(crate) fn error_response(err: DomainError) -> (StatusCode, Json<ErrorBody>) {
    let (status, body) = match err {
        DomainError::SessionNotFound(_) => (
            StatusCode::NOT_FOUND,
            ErrorBody {
                error: "Contract not found".to_string(),
                raw: None,
            },
        ),
        DomainError::MalformedOutput { ref raw, .. } => {
            let raw = Some(raw.clone());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: err.to_string(),
                    raw,
                },
            )
        }
        DomainError::Provider { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                error: "AI analysis failed".to_string(),
                raw: None,
            },
        ),
        DomainError::InvalidInput(msg) => (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                error: msg,
                raw: None,
            },
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody {
                error: other.to_string(),
                raw: None,
            },
        ),
    };

    (status, Json(body))
}
