//! JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use broker_core::BrokerError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

/// Handler-level error; every failure leaves as `{ "message": ... }`
#[derive(Debug)]
pub struct ApiError(pub BrokerError);

impl<E> From<E> for ApiError
where
    E: Into<BrokerError>,
{
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match &self.0 {
            // Never reveal which setting is missing
            BrokerError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server misconfigured".to_string(),
            ),
            BrokerError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            BrokerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            BrokerError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            err @ (BrokerError::Upstream { .. }
            | BrokerError::Transport(_)
            | BrokerError::Internal(_)) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        } else {
            debug!("Request rejected ({}): {}", status.as_u16(), self.0);
        }
        (status, Json(ErrorResponse { message })).into_response()
    }
}
