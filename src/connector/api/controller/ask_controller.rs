use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::super::Container;
use super::error_response;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub session_id: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
}

pub async fn ask(
    State(container): State<Arc<Container>>,
    Json(request): Json<AskRequest>,
) -> Response {
    match container
        .ask_use_case()
        .execute(&request.session_id, &request.question)
        .await
    {
        Ok(answer) => (StatusCode::OK, Json(AskResponse { answer })).into_response(),
        Err(err) => {
            // An unknown session is an expected client mistake, not an
            // operational failure.
            if !err.is_session_not_found() {
                error!("Question answering failed: {err}");
            }
            error_response(err).into_response()
        }
    }
}
