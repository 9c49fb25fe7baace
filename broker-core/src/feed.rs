//! Feed definitions: curated (query, domain set) bundles

use serde::{Deserialize, Serialize};

/// A named search bundle approximating a trend source with no direct API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDefinition {
    /// Stable unique identifier (e.g. "youtube_trends")
    pub feed_id: String,
    /// Display name
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Content type tag (e.g. "short_video", "newsletter")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Allowed source hostnames, in registration order
    pub domains: Vec<String>,
    /// Boolean search expression over article title/body
    pub query: String,
}

impl FeedDefinition {
    pub fn new(
        feed_id: &str,
        name: &str,
        homepage: Option<&str>,
        content_type: Option<&str>,
        domains: &[&str],
        query: &str,
    ) -> Self {
        Self {
            feed_id: feed_id.to_string(),
            name: name.to_string(),
            homepage: homepage.map(str::to_string),
            content_type: content_type.map(str::to_string),
            domains: domains.iter().map(|d| d.to_string()).collect(),
            query: query.to_string(),
        }
    }

    /// Public listing view (no query or domain internals)
    pub fn summary(&self) -> FeedSummary {
        FeedSummary {
            feed_id: self.feed_id.clone(),
            name: self.name.clone(),
            homepage: self.homepage.clone(),
            content_type: self.content_type.clone(),
        }
    }
}

/// Entry in the `/v1/sources` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSummary {
    pub feed_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}
