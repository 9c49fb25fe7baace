//! API route definitions

mod digest;
mod feeds;
mod health;
mod sources;

use axum::Router;

use crate::AppState;

/// Authenticated `/v1` routes
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .merge(sources::routes())
        .merge(feeds::routes())
        .merge(digest::routes())
}

/// Unauthenticated health probes
pub fn health_routes() -> Router<AppState> {
    health::routes()
}
