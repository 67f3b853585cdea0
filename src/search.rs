use crate::fetcher::Fetcher;
use crate::types::{FetchConfig, Result, SupplyResult, TrendError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Seam between the gap scorer and whatever external search backend is in
/// use. Implementations issue one query and return up to `max_results`
/// hits with normalized fields.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SupplyResult>>;

    fn provider_name(&self) -> String;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SupplyResult>,
}

const DEFAULT_SEARCH_ENDPOINT: &str = "https://duckduckgo.com/v.js";

/// Video search over a JSON endpoint. The response is expected to carry a
/// `results` array; per-hit field naming differences are absorbed by the
/// aliases on `SupplyResult`.
pub struct VideoSearch {
    fetcher: Fetcher,
    endpoint: String,
}

impl VideoSearch {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            fetcher: Fetcher::new(config),
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Point at a different search endpoint, mainly for tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for VideoSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SupplyResult>> {
        let count = max_results.to_string();
        let url = Url::parse_with_params(&self.endpoint, &[("q", query), ("count", count.as_str())])?;

        debug!("Searching videos: {}", query);

        let body = self.fetcher.fetch_text(url.as_str()).await?;
        let response: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| TrendError::Search(format!("Malformed search response: {}", e)))?;

        let hits: Vec<SupplyResult> = response.results.into_iter().take(max_results).collect();
        debug!("Search returned {} hits for '{}'", hits.len(), query);
        Ok(hits)
    }

    fn provider_name(&self) -> String {
        match Url::parse(&self.endpoint) {
            Ok(parsed) => parsed
                .host_str()
                .map(|h| format!("Video Search ({})", h))
                .unwrap_or_else(|| "Video Search".to_string()),
            Err(_) => "Video Search".to_string(),
        }
    }
}
