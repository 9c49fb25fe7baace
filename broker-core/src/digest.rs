//! Composed digest output

use serde::{Deserialize, Serialize};

/// One rendered item inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub headline: String,
    pub blurb: String,
    pub urls: Vec<String>,
}

/// A named bucket of ranked entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub items: Vec<SectionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    pub title: String,
    pub source: String,
}

/// Newsletter digest response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub title: String,
    /// ISO-8601 composition time
    pub generated_at: String,
    pub sections: Vec<Section>,
    pub citations: Vec<Citation>,
}
