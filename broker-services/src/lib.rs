//! Business logic services for the digital-first news broker
//!
//! This crate turns raw search results into classified, deduplicated items
//! and composes them into sectioned newsletter digests.

pub mod broker_service;
pub mod classifier;
pub mod dedup;
pub mod digest;

pub use broker_service::{BrokerService, ServiceConfig};
pub use classifier::{Classifier, ClassifierRules, ExclusionRule, TextFields};
pub use dedup::merge;
pub use digest::{DigestComposer, SectionRule, BASE_SCORE, MATCH_SCORE, MAX_CITATIONS};
