use crate::types::{FetchConfig, Result, TrendError};
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// HTTP fetcher shared by the feed endpoints and the search provider.
/// Applies a bounded timeout, limited retries with exponential backoff,
/// and a minimum interval between requests to the same host.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    rate_limiter: Arc<RwLock<HashMap<String, Instant>>>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            rate_limiter: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Fetch a URL and return the response body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching: {}", url);

        self.apply_rate_limit(url).await?;

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 16),
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.retry_delay_seconds * 30)),
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if !status.is_success() {
                        last_error = Some(TrendError::General(format!(
                            "HTTP {}: {}",
                            status,
                            status.canonical_reason().unwrap_or("Unknown")
                        )));
                    } else {
                        match response.text().await {
                            Ok(body) => {
                                debug!("Fetched {} ({} bytes)", url, body.len());
                                return Ok(body);
                            }
                            Err(e) => last_error = Some(TrendError::Http(e)),
                        }
                    }
                }
                Err(e) => last_error = Some(TrendError::Http(e)),
            }

            if attempt < self.config.max_retries {
                match backoff.next_backoff() {
                    Some(delay) => {
                        warn!("Attempt {} failed for {}, retrying in {:?}", attempt + 1, url, delay);
                        tokio::time::sleep(delay).await;
                    }
                    None => break,
                }
            }
        }

        Err(last_error.unwrap_or_else(|| TrendError::General("Unknown fetch error".to_string())))
    }

    async fn apply_rate_limit(&self, url: &str) -> Result<()> {
        let parsed_url = Url::parse(url)?;
        let host = parsed_url.host_str().unwrap_or("").to_string();

        let now = Instant::now();
        let min_interval = Duration::from_secs(1);

        {
            let mut rate_limiter = self.rate_limiter.write().await;

            if let Some(last_request) = rate_limiter.get(&host) {
                let elapsed = now.duration_since(*last_request);
                if elapsed < min_interval {
                    let wait_time = min_interval - elapsed;
                    debug!("Rate limiting {}: waiting {:?}", host, wait_time);
                    tokio::time::sleep(wait_time).await;
                }
            }

            rate_limiter.insert(host, Instant::now());
        }

        Ok(())
    }
}
