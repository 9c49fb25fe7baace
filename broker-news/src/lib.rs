//! Article sourcing for the digital-first news broker
//!
//! This crate provides:
//! - The curated feed catalog (query + domain bundles per trend source)
//! - A NewsAPI-compatible article search client behind the `ArticleSearch` trait
//! - Normalization of raw provider articles into canonical `Item`s

pub mod catalog;
pub mod error;
pub mod newsapi;
pub mod normalizer;
pub mod search;
pub mod types;

pub use catalog::FeedCatalog;
pub use error::NewsError;
pub use newsapi::NewsApiClient;
pub use normalizer::{fingerprint, normalize, normalize_at, UNTITLED};
pub use search::{ArticleSearch, SearchQuery, MAX_PAGE_SIZE};
pub use types::RawArticle;
