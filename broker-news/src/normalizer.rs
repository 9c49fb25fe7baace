//! Raw article -> canonical `Item`

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use broker_core::{Classification, Item};

use crate::types::RawArticle;

/// Title used when the provider sends none
pub const UNTITLED: &str = "(untitled)";

/// ASCII unit separator; never appears in urls or timestamps
const FINGERPRINT_SEPARATOR: &str = "\u{1f}";

/// Normalize using the current wall-clock time as the fallback publish time
pub fn normalize(raw: &RawArticle, feed_id: &str) -> Item {
    normalize_at(raw, feed_id, Utc::now())
}

/// Normalize with an explicit fallback publish time
///
/// The classification is left empty; the classifier attaches it right after.
pub fn normalize_at(raw: &RawArticle, feed_id: &str, fetched_at: DateTime<Utc>) -> Item {
    let url = raw.url.as_deref().map(str::trim).unwrap_or_default().to_string();

    let published_at = non_blank(raw.published_at.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| fetched_at.to_rfc3339_opts(SecondsFormat::Secs, true));

    let title = non_blank(raw.title.as_deref())
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| UNTITLED.to_string());

    Item {
        id: fingerprint(&url, &published_at),
        title,
        url,
        source: feed_id.to_string(),
        published_at,
        snippet: raw.description.clone().unwrap_or_default(),
        labels: Vec::new(),
        classification: Classification::default(),
    }
}

/// Hex SHA-256 of `url` and `published_at`
pub fn fingerprint(url: &str, published_at: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(FINGERPRINT_SEPARATOR.as_bytes());
    hasher.update(published_at.as_bytes());
    hex::encode(hasher.finalize())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
