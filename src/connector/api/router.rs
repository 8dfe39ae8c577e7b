use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use super::container::Container;
use super::controller::{analyze, ask, liveness};

/// Uploaded contracts are plain text; 10 MiB is far beyond any realistic one.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/analyze", post(analyze))
        .route("/ask", post(ask))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(container)
}
