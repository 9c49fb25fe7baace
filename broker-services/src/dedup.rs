//! Cross-feed deduplication keyed by url
//!
//! Policy: last-seen occurrence wins, output keeps first-seen key order.

use indexmap::IndexMap;

use broker_core::Item;

/// Merge item batches into a set unique by `url`
pub fn merge<I>(batches: I) -> Vec<Item>
where
    I: IntoIterator<Item = Vec<Item>>,
{
    let mut by_url: IndexMap<String, Item> = IndexMap::new();
    for item in batches.into_iter().flatten() {
        // insert() keeps the original slot and replaces the value
        by_url.insert(item.url.clone(), item);
    }
    by_url.into_values().collect()
}
