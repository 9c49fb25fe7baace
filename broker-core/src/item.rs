//! Canonical item entity and its classification

use serde::{Deserialize, Serialize};

/// Result of the digital-first heuristic for one item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// True only when no exclusion fired and a digital-first hint matched
    pub digital_first: bool,
    /// Exclusion tags that fired, in vocabulary order
    pub excluded_reasons: Vec<String>,
}

/// A normalized, classified article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Content fingerprint (hex SHA-256 of url + published_at)
    pub id: String,
    pub title: String,
    /// Dedup key
    pub url: String,
    /// Owning feed_id
    pub source: String,
    /// ISO-8601 timestamp
    pub published_at: String,
    pub snippet: String,
    /// Reserved, always empty for now
    #[serde(default)]
    pub labels: Vec<String>,
    pub classification: Classification,
}
