//! Wire types for the NewsAPI-compatible search provider

use serde::{Deserialize, Serialize};

/// A single article as returned by the provider
///
/// Every field is optional on the wire; normalization fills defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// ISO 8601 publication time
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
}

impl RawArticle {
    pub fn new(title: &str, description: &str, url: &str, published_at: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            url: Some(url.to_string()),
            published_at: Some(published_at.to_string()),
        }
    }
}

/// `/everything` response envelope
#[derive(Debug, Deserialize)]
pub struct NewsApiResponse {
    /// "ok" or "error"
    pub status: Option<String>,
    #[serde(rename = "totalResults")]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
    /// Error code when status is "error"
    pub code: Option<String>,
    /// Error message when status is "error"
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_with_missing_fields() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"id": null, "name": "The Verge"}, "title": "YouTube tests new Shorts tools",
                 "description": null, "url": "https://www.theverge.com/a", "publishedAt": "2026-10-15T09:00:00Z"},
                {"title": null, "url": "https://techcrunch.com/b"}
            ]
        }"#;
        let parsed: NewsApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.total_results, Some(2));
        assert_eq!(parsed.articles.len(), 2);
        assert_eq!(
            parsed.articles[0].published_at.as_deref(),
            Some("2026-10-15T09:00:00Z")
        );
        assert_eq!(parsed.articles[1].title, None);
        assert_eq!(parsed.articles[1].published_at, None);
    }

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let parsed: NewsApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.status.as_deref(), Some("error"));
        assert!(parsed.articles.is_empty());
        assert_eq!(parsed.code.as_deref(), Some("apiKeyInvalid"));
    }
}
