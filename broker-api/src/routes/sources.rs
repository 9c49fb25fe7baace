//! Feed catalog listing

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use broker_core::FeedSummary;

use crate::AppState;

#[derive(Debug, Serialize)]
struct SourcesResponse {
    sources: Vec<FeedSummary>,
}

/// GET /v1/sources
async fn list_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        sources: state.broker.list_feeds(),
    })
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/sources", get(list_sources))
}
