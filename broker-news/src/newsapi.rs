//! NewsAPI-compatible client for article search

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use tracing::{debug, info, instrument};

use crate::error::NewsError;
use crate::search::{ArticleSearch, SearchQuery};
use crate::types::{NewsApiResponse, RawArticle};

/// Default provider endpoint
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

/// NewsAPI `/everything` client
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiClient {
    /// Create a client against the public endpoint
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (proxies, test servers)
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("digest-broker/0.1")
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn credential(&self) -> Result<&str, NewsError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| NewsError::Configuration("NEWSAPI_KEY is not set".to_string()))
    }
}

#[async_trait]
impl ArticleSearch for NewsApiClient {
    #[instrument(skip(self, query), fields(page_size = query.clamped_page_size(), domains = query.domains.len()))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawArticle>, NewsError> {
        // Fail fast before any network activity
        let api_key = self.credential()?;

        let params = build_params(query);
        info!(
            "Searching NewsAPI: query='{}', since={:?}, page_size={}",
            query.query.chars().take(80).collect::<String>(),
            query.since,
            query.clamped_page_size()
        );

        let mut request = self
            .client
            .get(format!("{}/everything", self.base_url))
            .header("X-Api-Key", api_key)
            .query(&params);
        if let Some(timeout) = query.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NewsError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::Upstream {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: NewsApiResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Parse(e.to_string()))?;

        if body.status.as_deref() == Some("error") {
            return Err(NewsError::Upstream {
                status: status.as_u16(),
                message: body
                    .message
                    .or(body.code)
                    .unwrap_or_else(|| "provider reported an error".to_string()),
            });
        }

        info!(
            "Received {} articles from NewsAPI (total available: {:?})",
            body.articles.len(),
            body.total_results
        );

        Ok(retain_usable(body.articles, query.since))
    }
}

/// Query string for `/everything`
fn build_params(query: &SearchQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("q", query.query.clone())];
    if !query.domains.is_empty() {
        params.push(("domains", query.domains.join(",")));
    }
    if let Some(since) = query.since {
        params.push(("from", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    params.push(("pageSize", query.clamped_page_size().to_string()));
    params.push(("sortBy", "publishedAt".to_string()));
    params
}

/// Drop articles that cannot be keyed by url, or that predate the cutoff
fn retain_usable(articles: Vec<RawArticle>, since: Option<DateTime<Utc>>) -> Vec<RawArticle> {
    articles
        .into_iter()
        .filter(|article| {
            let has_url = article
                .url
                .as_deref()
                .is_some_and(|url| !url.trim().is_empty());
            if !has_url {
                debug!("Skipping article without url: {:?}", article.title);
            }
            has_url
        })
        .filter(|article| match (since, published(article)) {
            (Some(cutoff), Some(at)) if at < cutoff => {
                debug!("Skipping article older than cutoff: {:?} ({})", article.title, at);
                false
            }
            _ => true,
        })
        .collect()
}

fn published(article: &RawArticle) -> Option<DateTime<Utc>> {
    article
        .published_at
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.with_timezone(&Utc))
}
