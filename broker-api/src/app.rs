//! Router assembly and shared state

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method},
    middleware, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use broker_services::BrokerService;

use crate::auth::{require_api_key, API_KEY_HEADER};
use crate::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<BrokerService>,
    /// Expected value of the `x-api-key` header
    pub shared_secret: Option<Arc<str>>,
    pub search_configured: bool,
}

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)]);

    let v1 = routes::v1_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        require_api_key,
    ));

    Router::new()
        .nest("/v1", v1)
        .merge(routes::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
