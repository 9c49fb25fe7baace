//! Core types for the digital-first news broker
//!
//! This crate defines the shared data structures used across the broker:
//! feed definitions, normalized items and their classification, composed
//! digests, request parameters and the boundary error taxonomy.

pub mod digest;
pub mod error;
pub mod feed;
pub mod item;
pub mod params;

pub use digest::{Citation, Digest, Section, SectionEntry};
pub use error::{BrokerError, BrokerResult};
pub use feed::{FeedDefinition, FeedSummary};
pub use item::{Classification, Item};
pub use params::{DigestRequest, FeedItemsParams, DEFAULT_EXCLUDE_TAGS};
