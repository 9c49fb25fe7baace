//! Article search seam
//!
//! The pipeline only ever talks to `dyn ArticleSearch`, so the provider can be
//! swapped (or stubbed in tests) without touching classification or digest code.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use broker_core::FeedDefinition;

use crate::error::NewsError;
use crate::types::RawArticle;

/// Provider-imposed page size ceiling
pub const MAX_PAGE_SIZE: usize = 50;

/// One search request against the provider
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Boolean keyword expression
    pub query: String,
    /// Hostname allow-list; empty means unrestricted
    pub domains: Vec<String>,
    /// Exclude articles published strictly before this instant
    pub since: Option<DateTime<Utc>>,
    pub page_size: usize,
    /// Per-call deadline
    pub timeout: Option<Duration>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, page_size: usize) -> Self {
        Self {
            query: query.into(),
            domains: Vec::new(),
            since: None,
            page_size,
            timeout: None,
        }
    }

    /// Query built from a catalog feed's expression and domain set
    pub fn for_feed(feed: &FeedDefinition, page_size: usize) -> Self {
        Self {
            domains: feed.domains.clone(),
            ..Self::new(feed.query.clone(), page_size)
        }
    }

    pub fn with_since(mut self, since: Option<DateTime<Utc>>) -> Self {
        self.since = since;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Page size as actually sent to the provider
    pub fn clamped_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// Something that can turn a `SearchQuery` into raw articles
#[async_trait]
pub trait ArticleSearch: Send + Sync {
    /// Perform exactly one provider call. No retries, no caching.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawArticle>, NewsError>;
}
