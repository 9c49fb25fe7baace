//! Request parameters for the broker operations

use serde::{Deserialize, Serialize};

/// Exclusion tags applied when the caller does not say otherwise
pub const DEFAULT_EXCLUDE_TAGS: [&str; 2] = ["linear", "streaming"];

/// Parameters for fetching a single feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItemsParams {
    /// Requested number of articles (page size is clamped by the client)
    pub limit: usize,
    /// Only articles published within this many hours
    pub since_hours: Option<u32>,
    pub digital_first_only: bool,
    pub exclude: Vec<String>,
}

impl Default for FeedItemsParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            since_hours: None,
            digital_first_only: true,
            exclude: default_exclude(),
        }
    }
}

/// Body of `POST /v1/newsletter/digest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestRequest {
    /// Feed ids to aggregate
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
    #[serde(default = "default_max_items_per_section")]
    pub max_items_per_section: usize,
    #[serde(default = "default_true")]
    pub digital_first_only: bool,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl DigestRequest {
    pub fn for_sources(sources: &[&str]) -> Self {
        Self {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            window_hours: default_window_hours(),
            max_items_per_section: default_max_items_per_section(),
            digital_first_only: true,
            exclude: default_exclude(),
        }
    }
}

fn default_limit() -> usize {
    20
}

fn default_window_hours() -> u32 {
    168
}

fn default_max_items_per_section() -> usize {
    6
}

fn default_true() -> bool {
    true
}

pub fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE_TAGS.iter().map(|t| t.to_string()).collect()
}
