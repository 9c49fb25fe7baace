//! Error types for the news module

use broker_core::BrokerError;
use thiserror::Error;

/// Errors that can occur while talking to the search provider
#[derive(Debug, Error)]
pub enum NewsError {
    /// Provider credential is missing; the call is never attempted
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Response body from the provider
        message: String,
    },

    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    Transport(String),

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<NewsError> for BrokerError {
    fn from(err: NewsError) -> Self {
        match err {
            NewsError::Configuration(msg) => BrokerError::Configuration(msg),
            NewsError::Upstream { status, message } => BrokerError::Upstream { status, message },
            NewsError::Transport(msg) => BrokerError::Transport(msg),
            // A 2xx with an unreadable body is still the provider's failure
            NewsError::Parse(msg) => BrokerError::Upstream {
                status: 502,
                message: msg,
            },
        }
    }
}
