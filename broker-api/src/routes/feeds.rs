//! Single-feed item endpoint

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use broker_core::{params::default_exclude, BrokerError, FeedItemsParams, Item};

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for a feed fetch
#[derive(Debug, Default, Deserialize)]
pub struct FeedItemsQuery {
    pub limit: Option<usize>,
    pub since_hours: Option<u32>,
    pub digital_first_only: Option<bool>,
    /// Comma-separated exclusion tags; an empty value disables exclusions
    pub exclude: Option<String>,
}

impl From<FeedItemsQuery> for FeedItemsParams {
    fn from(query: FeedItemsQuery) -> Self {
        let defaults = FeedItemsParams::default();
        FeedItemsParams {
            limit: query.limit.unwrap_or(defaults.limit),
            since_hours: query.since_hours,
            digital_first_only: query
                .digital_first_only
                .unwrap_or(defaults.digital_first_only),
            exclude: query
                .exclude
                .map(|tags| {
                    tags.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_else(default_exclude),
        }
    }
}

#[derive(Debug, Serialize)]
struct ItemsResponse {
    items: Vec<Item>,
}

/// GET /v1/feeds/{feed_id}/items
async fn get_feed_items(
    State(state): State<AppState>,
    Path(feed_id): Path<String>,
    query: Result<Query<FeedItemsQuery>, QueryRejection>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let Query(query) = query
        .map_err(|e| BrokerError::validation(format!("Invalid inputs: {}", e.body_text())))?;
    let params = FeedItemsParams::from(query);

    let items = state.broker.feed_items(&feed_id, &params).await?;
    info!("Returning {} items for feed {}", items.len(), feed_id);

    Ok(Json(ItemsResponse { items }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/feeds/{feed_id}/items", get(get_feed_items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let params = FeedItemsParams::from(FeedItemsQuery::default());
        assert_eq!(params, FeedItemsParams::default());
    }

    #[test]
    fn test_exclude_parsing() {
        let params = FeedItemsParams::from(FeedItemsQuery {
            exclude: Some(" streaming , ,linear".to_string()),
            ..FeedItemsQuery::default()
        });
        assert_eq!(params.exclude, vec!["streaming", "linear"]);

        let params = FeedItemsParams::from(FeedItemsQuery {
            exclude: Some(String::new()),
            ..FeedItemsQuery::default()
        });
        assert!(params.exclude.is_empty());
    }
}
