//! Error types for the broker

use thiserror::Error;

/// Broker-wide error type, one variant per boundary failure class
#[derive(Error, Debug)]
pub enum BrokerError {
    /// A required secret or credential is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    /// Search provider answered with a non-success status
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Search provider could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BrokerError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        BrokerError::Configuration(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        BrokerError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        BrokerError::Validation(msg.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        BrokerError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        BrokerError::Transport(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        BrokerError::Internal(msg.into())
    }
}

/// Result type alias for broker operations
pub type BrokerResult<T> = Result<T, BrokerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_carries_status_and_body() {
        let err = BrokerError::upstream(429, "rateLimited");
        assert_eq!(err.to_string(), "Upstream error (status 429): rateLimited");
    }

    #[test]
    fn test_not_found_display_is_bare_message() {
        let err = BrokerError::not_found("Unknown feed_id");
        assert_eq!(err.to_string(), "Unknown feed_id");
    }
}
