//! Newsletter digest composition endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use broker_core::{BrokerError, Digest, DigestRequest};

use crate::error::ApiError;
use crate::AppState;

/// POST /v1/newsletter/digest
async fn compose_digest(
    State(state): State<AppState>,
    body: Result<Json<DigestRequest>, JsonRejection>,
) -> Result<Json<Digest>, ApiError> {
    let Json(request) =
        body.map_err(|e| BrokerError::validation(format!("Invalid inputs: {}", e.body_text())))?;

    info!(
        "Composing digest: sources={:?}, window_hours={}, max_items_per_section={}",
        request.sources, request.window_hours, request.max_items_per_section
    );

    let digest = state.broker.compose_digest(&request).await?;
    Ok(Json(digest))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/newsletter/digest", post(compose_digest))
}
