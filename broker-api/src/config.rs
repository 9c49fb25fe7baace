//! Process configuration, read once at startup

use std::env;
use std::time::Duration;

use broker_news::newsapi::DEFAULT_BASE_URL;

/// Everything the server needs from the environment
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    pub port: u16,
    /// Search provider credential
    pub newsapi_key: Option<String>,
    pub newsapi_base_url: String,
    /// Shared secret expected in the `x-api-key` header
    pub shared_secret: Option<String>,
    pub upstream_timeout: Duration,
    pub max_concurrent_fetches: usize,
}

impl BrokerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads:
    /// - NEWSAPI_KEY, NEWSAPI_BASE_URL
    /// - BROKER_API_KEY
    /// - SERVER_PORT, UPSTREAM_TIMEOUT_SECS, MAX_CONCURRENT_FETCHES
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            newsapi_key: secret("NEWSAPI_KEY"),
            newsapi_base_url: lookup("NEWSAPI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            shared_secret: secret("BROKER_API_KEY"),
            upstream_timeout: Duration::from_secs(parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 15)?),
            max_concurrent_fetches: parse_or(&lookup, "MAX_CONCURRENT_FETCHES", 4usize)?.max(1),
        })
    }
}

fn parse_or<F, T>(lookup: &F, field: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(field) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            field: field.to_string(),
            value,
        }),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value:?}")]
    InvalidNumber { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = BrokerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.newsapi_key, None);
        assert_eq!(config.shared_secret, None);
        assert_eq!(config.newsapi_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(15));
        assert_eq!(config.max_concurrent_fetches, 4);
    }

    #[test]
    fn test_explicit_values() {
        let config = BrokerConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "9000"),
            ("NEWSAPI_KEY", "k"),
            ("BROKER_API_KEY", "s"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
            ("MAX_CONCURRENT_FETCHES", "0"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.newsapi_key.as_deref(), Some("k"));
        assert_eq!(config.shared_secret.as_deref(), Some("s"));
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
        assert_eq!(config.max_concurrent_fetches, 1);
    }

    #[test]
    fn test_blank_secret_counts_as_missing() {
        let config = BrokerConfig::from_lookup(lookup(&[("BROKER_API_KEY", "  ")])).unwrap();
        assert_eq!(config.shared_secret, None);
    }

    #[test]
    fn test_malformed_number() {
        let err = BrokerConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }
}
