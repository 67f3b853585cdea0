use crate::search::SearchProvider;
use crate::types::{GapReport, GapVerdict};
use tracing::{debug, warn};

/// Recency markers that flag a search hit as recent competing content.
/// Matched case-insensitively as substrings of the free-text recency field.
pub const RECENCY_MARKERS: [&str; 4] = ["hour", "day", "week", "month"];

/// At or above this many recent hits the keyword is saturated.
pub const SATURATED_THRESHOLD: usize = 5;
/// At or above this many recent hits (but below saturated) the market is
/// moderately served.
pub const MODERATE_THRESHOLD: usize = 2;

pub fn is_recent(recency: &str) -> bool {
    let lower = recency.to_lowercase();
    RECENCY_MARKERS.iter().any(|marker| lower.contains(marker))
}

fn classify(recent_count: usize) -> GapVerdict {
    if recent_count >= SATURATED_THRESHOLD {
        GapVerdict::Saturated
    } else if recent_count >= MODERATE_THRESHOLD {
        GapVerdict::Moderate
    } else {
        GapVerdict::Open
    }
}

/// Scores how much recent competing content exists for one keyword by
/// querying a search provider and bucketing the recent-hit count.
///
/// Policy: a provider failure or an empty result set yields the distinct
/// `NoData` verdict with a zero recent count, never an error. `NoData`
/// keeps "we could not measure" apart from a confirmed open gap.
pub struct GapScorer {
    provider: Box<dyn SearchProvider>,
}

impl GapScorer {
    pub fn new(provider: Box<dyn SearchProvider>) -> Self {
        Self { provider }
    }

    /// Query `"{keyword} {qualifier}"` and classify the result. Results are
    /// returned unfiltered for display; callers truncate to a preview.
    pub async fn score(&self, keyword: &str, qualifier: &str, max_results: usize) -> GapReport {
        let query = format!("{} {}", keyword, qualifier).trim().to_string();

        match self.provider.search(&query, max_results).await {
            Ok(results) if results.is_empty() => {
                debug!("No supply results for '{}'", query);
                GapReport::no_data()
            }
            Ok(results) => {
                let recent_count = results.iter().filter(|r| is_recent(&r.recency)).count();
                let verdict = classify(recent_count);
                debug!(
                    "Scored '{}': {} of {} hits recent, verdict {}",
                    query,
                    recent_count,
                    results.len(),
                    verdict
                );
                GapReport {
                    verdict,
                    recent_count,
                    results,
                }
            }
            Err(e) => {
                warn!(
                    "Supply search failed for '{}' via {}: {}",
                    query,
                    self.provider.provider_name(),
                    e
                );
                GapReport::no_data()
            }
        }
    }
}
