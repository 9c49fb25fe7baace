//! Shared-secret authentication for the `/v1` routes

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use broker_core::BrokerError;

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the caller's key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Reject the request unless `x-api-key` matches the configured secret
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = state
        .shared_secret
        .as_deref()
        .ok_or_else(|| BrokerError::configuration("BROKER_API_KEY is not set"))?;

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == expected => Ok(next.run(request).await),
        _ => Err(BrokerError::Unauthorized.into()),
    }
}
