use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::domain::{AnalysisResult, DomainError};

use super::super::Container;
use super::error_response;

/// Multipart field carrying the uploaded contract.
const CONTRACT_FIELD: &str = "contract";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub session_id: String,
    pub result: AnalysisResult,
}

pub async fn analyze(
    State(container): State<Arc<Container>>,
    multipart: Multipart,
) -> Response {
    let document_text = match read_contract_field(multipart).await {
        Ok(text) => text,
        Err(err) => return error_response(err).into_response(),
    };

    match container.analyze_use_case().execute(&document_text).await {
        Ok(analysis) => {
            let (session_id, result) = analysis.into_parts();
            (
                StatusCode::OK,
                Json(AnalyzeResponse { session_id, result }),
            )
                .into_response()
        }
        Err(err) => {
            error!("Contract analysis failed: {err}");
            error_response(err).into_response()
        }
    }
}

/// Pull the contract file field out of the multipart body as UTF-8 text.
///
/// Text extraction from binary formats happens upstream of this service;
/// the upload is required to already be plain text.
async fn read_contract_field(mut multipart: Multipart) -> Result<String, DomainError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::invalid_input(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(CONTRACT_FIELD) {
            continue;
        }

        let bytes = field.bytes().await.map_err(|e| {
            DomainError::invalid_input(format!("failed to read contract upload: {e}"))
        })?;

        return String::from_utf8(bytes.to_vec())
            .map_err(|_| DomainError::invalid_input("contract upload must be UTF-8 text"));
    }

    Err(DomainError::invalid_input(format!(
        "missing `{CONTRACT_FIELD}` file field"
    )))
}
