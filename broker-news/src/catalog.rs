//! Curated feed catalog
//!
//! Platform trend sources (YouTube, TikTok, newsletters...) have no usable
//! public trend API, so each feed is approximated by a keyword query over a
//! fixed set of trade-press domains.

use broker_core::FeedDefinition;

/// Process-wide, immutable feed registry
#[derive(Debug, Clone)]
pub struct FeedCatalog {
    feeds: Vec<FeedDefinition>,
}

impl FeedCatalog {
    /// Build a catalog from explicit definitions, in registration order
    pub fn new(feeds: Vec<FeedDefinition>) -> Self {
        Self { feeds }
    }

    /// The curated set of trend feeds
    pub fn curated() -> Self {
        Self::new(vec![
            FeedDefinition::new(
                "youtube_trends",
                "YouTube Trends",
                Some("https://www.youtube.com/feed/trending"),
                Some("video"),
                &[
                    "tubefilter.com",
                    "theverge.com",
                    "techcrunch.com",
                    "socialmediatoday.com",
                    "blog.youtube",
                ],
                "youtube AND (creator OR series OR shorts OR launch OR channel)",
            ),
            FeedDefinition::new(
                "tiktok_trends",
                "TikTok Trends",
                Some("https://www.tiktok.com/discover"),
                Some("short_video"),
                &[
                    "socialmediatoday.com",
                    "theverge.com",
                    "techcrunch.com",
                    "businessinsider.com",
                    "newsroom.tiktok.com",
                ],
                "tiktok AND (creator OR trend OR series OR feature OR monetization)",
            ),
            FeedDefinition::new(
                "instagram_reels",
                "Instagram Reels",
                Some("https://www.instagram.com/reels"),
                Some("short_video"),
                &[
                    "socialmediatoday.com",
                    "theverge.com",
                    "techcrunch.com",
                    "about.fb.com",
                ],
                "(instagram OR reels) AND (creator OR feature OR launch OR bonus)",
            ),
            FeedDefinition::new(
                "creator_economy",
                "Creator Economy",
                None,
                Some("creator_business"),
                &[
                    "passionfru.it",
                    "businessinsider.com",
                    "digiday.com",
                    "axios.com",
                    "theinformation.com",
                ],
                "\"creator economy\" OR (creator AND (fund OR deal OR startup OR brand))",
            ),
            FeedDefinition::new(
                "newsletter_boom",
                "Newsletter Boom",
                Some("https://substack.com/discover"),
                Some("newsletter"),
                &[
                    "niemanlab.org",
                    "pressgazette.co.uk",
                    "axios.com",
                    "theverge.com",
                ],
                "(newsletter OR substack OR beehiiv OR ghost) AND (launch OR writer OR subscription)",
            ),
            FeedDefinition::new(
                "podcast_video",
                "Video Podcasts",
                None,
                Some("podcast"),
                &[
                    "podnews.net",
                    "theverge.com",
                    "hollywoodreporter.com",
                    "tubefilter.com",
                ],
                "(podcast OR podcasts) AND (video OR youtube OR spotify OR clips)",
            ),
        ])
    }

    /// All feeds in registration order
    pub fn list(&self) -> &[FeedDefinition] {
        &self.feeds
    }

    pub fn get(&self, feed_id: &str) -> Option<&FeedDefinition> {
        self.feeds.iter().find(|f| f.feed_id == feed_id)
    }

    pub fn contains(&self, feed_id: &str) -> bool {
        self.get(feed_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

impl Default for FeedCatalog {
    fn default() -> Self {
        Self::curated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_curated_feeds() {
        let catalog = FeedCatalog::curated();
        assert!(!catalog.is_empty());

        let ids: HashSet<_> = catalog.list().iter().map(|f| f.feed_id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len(), "feed ids must be unique");

        for feed in catalog.list() {
            assert!(!feed.query.is_empty(), "{} has no query", feed.feed_id);
            assert!(!feed.domains.is_empty(), "{} has no domains", feed.feed_id);
        }
    }

    #[test]
    fn test_listing_is_registration_order() {
        let catalog = FeedCatalog::curated();
        let ids: Vec<_> = catalog.list().iter().map(|f| f.feed_id.as_str()).collect();
        assert_eq!(ids[0], "youtube_trends");
        assert_eq!(ids[1], "tiktok_trends");
        assert_eq!(ids.last(), Some(&"podcast_video"));
    }

    #[test]
    fn test_get_feed() {
        let catalog = FeedCatalog::curated();
        assert_eq!(
            catalog.get("tiktok_trends").map(|f| f.name.as_str()),
            Some("TikTok Trends")
        );
        assert!(catalog.get("unknown_feed").is_none());
        assert!(!catalog.contains("unknown_feed"));
    }
}
