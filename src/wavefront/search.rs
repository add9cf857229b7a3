//! Paged search
//!
//! `POST /api/v2/search/<type>` with an offset cursor. The server reports
//! whether more items remain; the loop is bounded by a page cap so a server
//! that never stops reporting more items cannot hang a run.

use super::client::WavefrontClient;
use super::error::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Page size requested from the search API
pub const SEARCH_PAGE_SIZE: i64 = 100;

/// Upper bound on pages fetched by one search
pub const DEFAULT_MAX_SEARCH_PAGES: usize = 1000;

/// How a search condition's value is compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchingMethod {
    Exact,
    Contains,
    StartsWith,
    TagPath,
    Limit,
}

/// One filter of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCondition {
    pub key: String,
    pub value: String,
    pub matching_method: MatchingMethod,
}

impl SearchCondition {
    pub fn new(key: &str, value: &str, matching_method: MatchingMethod) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            matching_method,
        }
    }

    /// Exact match on the `id` key
    pub fn exact_id(id: &str) -> Self {
        Self::new("id", id, MatchingMethod::Exact)
    }
}

#[derive(Debug, Serialize)]
struct SearchParams<'a> {
    limit: i64,
    offset: i64,
    query: &'a [SearchCondition],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPage<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    more_items: bool,
    #[serde(default)]
    offset: Option<i64>,
    #[serde(default)]
    limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope<T> {
    response: SearchPage<T>,
}

/// A search over one entity family
pub struct Search<'c> {
    client: &'c WavefrontClient,
    search_type: &'static str,
    conditions: Vec<SearchCondition>,
    max_pages: usize,
}

impl<'c> Search<'c> {
    pub fn new(
        client: &'c WavefrontClient,
        search_type: &'static str,
        conditions: Vec<SearchCondition>,
    ) -> Self {
        Self {
            client,
            search_type,
            conditions,
            max_pages: DEFAULT_MAX_SEARCH_PAGES,
        }
    }

    /// Override the page cap
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Fetch every page and concatenate the items
    pub async fn execute<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        let path = format!("/api/v2/search/{}", self.search_type);
        let mut results = Vec::new();
        let mut offset = 0;

        for page in 0..self.max_pages {
            let params = SearchParams {
                limit: SEARCH_PAGE_SIZE,
                offset,
                query: &self.conditions,
            };
            let body = serde_json::to_value(&params)?;
            let response = self.client.post(&path, &[], Some(&body)).await?;
            let envelope: SearchEnvelope<T> = serde_json::from_value(response)?;
            let page_items = envelope.response.items.len();

            tracing::debug!(
                "search {} page {} returned {} items (more: {})",
                self.search_type,
                page,
                page_items,
                envelope.response.more_items
            );

            results.extend(envelope.response.items);

            if !envelope.response.more_items || page_items == 0 {
                return Ok(results);
            }

            offset = envelope.response.offset.unwrap_or(offset)
                + envelope.response.limit.unwrap_or(SEARCH_PAGE_SIZE);
        }

        Err(ApiError::PaginationLimit {
            search_type: self.search_type,
            pages: self.max_pages,
        })
    }
}
