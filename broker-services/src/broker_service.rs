//! Broker Service
//!
//! Orchestrates the aggregation pipeline: resolve feeds from the catalog,
//! search the provider, normalize and classify each article, merge across
//! feeds and compose the digest.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, instrument};

use broker_core::{
    BrokerError, BrokerResult, Digest, DigestRequest, FeedDefinition, FeedItemsParams,
    FeedSummary, Item,
};
use broker_news::{normalize, ArticleSearch, FeedCatalog, SearchQuery, MAX_PAGE_SIZE};

use crate::classifier::Classifier;
use crate::dedup::merge;
use crate::digest::DigestComposer;

/// Configuration for BrokerService
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound on in-flight provider calls for one digest
    pub max_concurrent_fetches: usize,
    /// Deadline applied to every provider call
    pub upstream_timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 4,
            upstream_timeout: Some(Duration::from_secs(15)),
        }
    }
}

/// Aggregation-classification-digest pipeline
pub struct BrokerService {
    catalog: FeedCatalog,
    search: Arc<dyn ArticleSearch>,
    classifier: Classifier,
    composer: DigestComposer,
    config: ServiceConfig,
}

impl BrokerService {
    /// Create a service with the built-in classification and section tables
    pub fn new(
        catalog: FeedCatalog,
        search: Arc<dyn ArticleSearch>,
        config: ServiceConfig,
    ) -> BrokerResult<Self> {
        Ok(Self::with_rules(
            catalog,
            search,
            Classifier::with_defaults()?,
            DigestComposer::with_defaults()?,
            config,
        ))
    }

    /// Create a service with custom pattern tables
    pub fn with_rules(
        catalog: FeedCatalog,
        search: Arc<dyn ArticleSearch>,
        classifier: Classifier,
        composer: DigestComposer,
        config: ServiceConfig,
    ) -> Self {
        info!(
            "Initializing BrokerService ({} feeds, max {} concurrent fetches)",
            catalog.len(),
            config.max_concurrent_fetches
        );
        Self {
            catalog,
            search,
            classifier,
            composer,
            config,
        }
    }

    pub fn catalog(&self) -> &FeedCatalog {
        &self.catalog
    }

    /// Public listing of the catalog, registration order
    pub fn list_feeds(&self) -> Vec<FeedSummary> {
        self.catalog.list().iter().map(FeedDefinition::summary).collect()
    }

    /// Fetch, normalize and classify one feed
    #[instrument(skip(self, params), fields(limit = params.limit))]
    pub async fn feed_items(
        &self,
        feed_id: &str,
        params: &FeedItemsParams,
    ) -> BrokerResult<Vec<Item>> {
        let feed = self
            .catalog
            .get(feed_id)
            .ok_or_else(|| BrokerError::not_found("Unknown feed_id"))?;

        let since = params
            .since_hours
            .map(|hours| cutoff(hours, "since_hours"))
            .transpose()?;
        let page_size = params.limit.min(MAX_PAGE_SIZE);

        let items = self
            .fetch_feed(feed, page_size, since, &params.exclude)
            .await?;

        Ok(filter_digital_first(items, params.digital_first_only))
    }

    /// Aggregate several feeds into a sectioned digest
    #[instrument(skip(self, request), fields(sources = request.sources.len(), window_hours = request.window_hours))]
    pub async fn compose_digest(&self, request: &DigestRequest) -> BrokerResult<Digest> {
        let feeds = self.resolve_sources(request)?;
        let since = Some(cutoff(request.window_hours, "window_hours")?);

        // Futures are built up front so the handler future stays Send
        let fetches: Vec<_> = feeds
            .into_iter()
            .map(|feed| self.fetch_feed(feed, MAX_PAGE_SIZE, since, &request.exclude))
            .collect();

        // buffered() keeps request order, so the merge below is deterministic
        let batches: Vec<Vec<Item>> = stream::iter(fetches)
            .buffered(self.config.max_concurrent_fetches.max(1))
            .try_collect()
            .await?;

        let fetched: usize = batches.iter().map(Vec::len).sum();
        let merged = merge(batches);
        let items = filter_digital_first(merged, request.digital_first_only);

        info!(
            "Composing digest from {} items ({} fetched before dedup/filter)",
            items.len(),
            fetched
        );

        Ok(self.composer.compose(&items, request.max_items_per_section))
    }

    /// Validate a digest request and map its sources to catalog feeds
    fn resolve_sources(&self, request: &DigestRequest) -> BrokerResult<Vec<&FeedDefinition>> {
        if request.sources.is_empty() {
            return Err(BrokerError::validation(
                "Invalid inputs: sources must not be empty",
            ));
        }
        if request.window_hours == 0 {
            return Err(BrokerError::validation(
                "Invalid inputs: window_hours must be positive",
            ));
        }
        if request.max_items_per_section == 0 {
            return Err(BrokerError::validation(
                "Invalid inputs: max_items_per_section must be positive",
            ));
        }

        let mut feeds: Vec<&FeedDefinition> = Vec::new();
        for source in &request.sources {
            match self.catalog.get(source) {
                Some(feed) if !feeds.iter().any(|f| f.feed_id == feed.feed_id) => feeds.push(feed),
                Some(_) => debug!("Ignoring repeated source: {}", source),
                None => debug!("Ignoring unknown source: {}", source),
            }
        }

        if feeds.is_empty() {
            return Err(BrokerError::validation(
                "Invalid inputs: none of the sources are known feeds",
            ));
        }
        Ok(feeds)
    }

    async fn fetch_feed(
        &self,
        feed: &FeedDefinition,
        page_size: usize,
        since: Option<DateTime<Utc>>,
        exclude: &[String],
    ) -> BrokerResult<Vec<Item>> {
        let query = SearchQuery::for_feed(feed, page_size)
            .with_since(since)
            .with_timeout(self.config.upstream_timeout);

        let articles = self.search.search(&query).await?;
        debug!("Feed {} returned {} articles", feed.feed_id, articles.len());

        Ok(articles
            .iter()
            .map(|raw| self.classifier.annotate(normalize(raw, &feed.feed_id), exclude))
            .collect())
    }
}

/// Start of a trailing window of `hours`, rejecting windows chrono cannot represent
fn cutoff(hours: u32, field: &str) -> BrokerResult<DateTime<Utc>> {
    TimeDelta::try_hours(i64::from(hours))
        .and_then(|window| Utc::now().checked_sub_signed(window))
        .ok_or_else(|| BrokerError::validation(format!("Invalid inputs: {} is out of range", field)))
}

fn filter_digital_first(items: Vec<Item>, digital_first_only: bool) -> Vec<Item> {
    if !digital_first_only {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.classification.digital_first)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use broker_news::{NewsError, RawArticle};

    /// Provider stub keyed by query string
    #[derive(Default)]
    struct StubSearch {
        articles: HashMap<String, Vec<RawArticle>>,
        failing_query: Option<String>,
        calls: Mutex<Vec<SearchQuery>>,
    }

    impl StubSearch {
        fn with(mut self, query: &str, articles: Vec<RawArticle>) -> Self {
            self.articles.insert(query.to_string(), articles);
            self
        }

        fn failing(mut self, query: &str) -> Self {
            self.failing_query = Some(query.to_string());
            self
        }

        fn calls(&self) -> Vec<SearchQuery> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ArticleSearch for StubSearch {
        async fn search(&self, query: &SearchQuery) -> Result<Vec<RawArticle>, NewsError> {
            self.calls.lock().unwrap().push(query.clone());
            if self.failing_query.as_deref() == Some(query.query.as_str()) {
                return Err(NewsError::Upstream {
                    status: 429,
                    message: "rateLimited".to_string(),
                });
            }
            Ok(self.articles.get(&query.query).cloned().unwrap_or_default())
        }
    }

    fn catalog() -> FeedCatalog {
        FeedCatalog::new(vec![
            FeedDefinition::new("alpha", "Alpha", None, Some("video"), &["a.com"], "alpha-q"),
            FeedDefinition::new("beta", "Beta", None, None, &["b.com"], "beta-q"),
        ])
    }

    fn service(stub: Arc<StubSearch>) -> BrokerService {
        BrokerService::new(catalog(), stub, ServiceConfig::default()).unwrap()
    }

    fn article(title: &str, url: &str) -> RawArticle {
        RawArticle::new(title, "", url, "2026-10-16T10:00:00Z")
    }

    #[test]
    fn test_list_feeds() {
        let svc = service(Arc::new(StubSearch::default()));
        let ids: Vec<_> = svc.list_feeds().into_iter().map(|f| f.feed_id).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_unknown_feed_is_not_found() {
        let svc = service(Arc::new(StubSearch::default()));
        let err = svc
            .feed_items("unknown_feed", &FeedItemsParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::NotFound(ref m) if m == "Unknown feed_id"));
    }

    #[tokio::test]
    async fn test_feed_items_filters_and_clamps() {
        let stub = Arc::new(StubSearch::default().with(
            "alpha-q",
            vec![
                article("TikTok Shorts launch announced", "https://a.com/1"),
                article("Netflix streaming record", "https://a.com/2"),
                article("Quarterly earnings", "https://a.com/3"),
            ],
        ));
        let svc = service(stub.clone());

        let params = FeedItemsParams {
            limit: 200,
            since_hours: Some(24),
            ..FeedItemsParams::default()
        };
        let items = svc.feed_items("alpha", &params).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "TikTok Shorts launch announced");
        assert_eq!(items[0].source, "alpha");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].page_size, 50);
        assert_eq!(calls[0].domains, vec!["a.com"]);
        assert!(calls[0].since.is_some());
        assert_eq!(calls[0].timeout, Some(Duration::from_secs(15)));
    }

    #[tokio::test]
    async fn test_feed_items_unfiltered_keeps_reasons() {
        let stub = Arc::new(StubSearch::default().with(
            "alpha-q",
            vec![article("Netflix streaming record", "https://a.com/2")],
        ));
        let svc = service(stub);
        let params = FeedItemsParams {
            digital_first_only: false,
            exclude: vec!["streaming".to_string()],
            ..FeedItemsParams::default()
        };
        let items = svc.feed_items("alpha", &params).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].classification.excluded_reasons, vec!["streaming"]);
        assert!(!items[0].classification.digital_first);
    }

    #[tokio::test]
    async fn test_digest_merges_cross_feed_duplicates() {
        let stub = Arc::new(
            StubSearch::default()
                .with(
                    "alpha-q",
                    vec![
                        article("YouTube creator launches series", "https://shared.com/x"),
                        article("Instagram Reels payouts change", "https://a.com/2"),
                    ],
                )
                .with(
                    "beta-q",
                    vec![article("YouTube creator launches series (update)", "https://shared.com/x")],
                ),
        );
        let svc = service(stub.clone());

        let digest = svc
            .compose_digest(&DigestRequest::for_sources(&["alpha", "beta"]))
            .await
            .unwrap();

        assert_eq!(digest.citations.len(), 2);
        assert_eq!(digest.citations[0].url, "https://shared.com/x");
        assert_eq!(digest.citations[0].source, "beta");
        assert_eq!(digest.citations[0].title, "YouTube creator launches series (update)");
        assert_eq!(digest.sections.len(), 4);

        let calls = stub.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|c| c.page_size == 50 && c.since.is_some()));
    }

    #[tokio::test]
    async fn test_digest_filters_excluded_items() {
        let stub = Arc::new(StubSearch::default().with(
            "alpha-q",
            vec![
                article("Netflix streaming creators", "https://a.com/1"),
                article("TikTok Shorts launch announced", "https://a.com/2"),
            ],
        ));
        let svc = service(stub);
        let digest = svc
            .compose_digest(&DigestRequest::for_sources(&["alpha"]))
            .await
            .unwrap();
        assert_eq!(digest.citations.len(), 1);
        assert_eq!(digest.citations[0].url, "https://a.com/2");
        assert_eq!(
            digest.sections[0].items[0].headline,
            "TikTok Shorts launch announced"
        );
    }

    #[tokio::test]
    async fn test_digest_validation() {
        let svc = service(Arc::new(StubSearch::default()));

        let err = svc
            .compose_digest(&DigestRequest::for_sources(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::Validation(ref m) if m.starts_with("Invalid inputs")));

        let err = svc
            .compose_digest(&DigestRequest::for_sources(&["nope", "also_nope"]))
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::Validation(_)));

        let mut request = DigestRequest::for_sources(&["alpha"]);
        request.max_items_per_section = 0;
        assert!(matches!(
            svc.compose_digest(&request).await,
            Err(BrokerError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_digest_skips_unknown_and_repeated_sources() {
        let stub = Arc::new(StubSearch::default());
        let svc = service(stub.clone());
        svc.compose_digest(&DigestRequest::for_sources(&["alpha", "nope", "alpha"]))
            .await
            .unwrap();
        assert_eq!(stub.calls().len(), 1);
    }

    fn assert_send<T: Send>(_: T) {}

    #[test]
    fn test_pipeline_futures_are_send() {
        let svc = service(Arc::new(StubSearch::default()));
        let request = DigestRequest::for_sources(&["alpha", "beta"]);
        assert_send(svc.compose_digest(&request));
        assert_send(svc.feed_items("alpha", &FeedItemsParams::default()));
    }

    #[tokio::test]
    async fn test_out_of_range_windows_are_rejected() {
        let stub = Arc::new(StubSearch::default());
        let svc = service(stub.clone());

        let params = FeedItemsParams {
            since_hours: Some(4_000_000_000),
            ..FeedItemsParams::default()
        };
        let err = svc.feed_items("alpha", &params).await.unwrap_err();
        assert!(matches!(err, BrokerError::Validation(ref m) if m.contains("since_hours")));

        let mut request = DigestRequest::for_sources(&["alpha"]);
        request.window_hours = 4_000_000_000;
        let err = svc.compose_digest(&request).await.unwrap_err();
        assert!(matches!(err, BrokerError::Validation(ref m) if m.contains("window_hours")));

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_one_failing_feed_aborts_digest() {
        let stub = Arc::new(
            StubSearch::default()
                .with("alpha-q", vec![article("YouTube launch", "https://a.com/1")])
                .failing("beta-q"),
        );
        let svc = service(stub);
        let err = svc
            .compose_digest(&DigestRequest::for_sources(&["alpha", "beta"]))
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::Upstream { status: 429, .. }));
    }
}
