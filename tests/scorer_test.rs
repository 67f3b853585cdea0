use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use trend_hunter::scorer::{is_recent, GapScorer};
use trend_hunter::search::SearchProvider;
use trend_hunter::types::{GapVerdict, Result, SupplyResult, TrendError};

/// Canned search provider: returns fixed hits or a fixed failure, and
/// records the last query it saw.
struct StubProvider {
    hits: Vec<SupplyResult>,
    fail: bool,
    last_query: Arc<Mutex<Option<String>>>,
}

impl StubProvider {
    fn with_hits(hits: Vec<SupplyResult>) -> Self {
        Self {
            hits,
            fail: false,
            last_query: Arc::new(Mutex::new(None)),
        }
    }

    fn failing() -> Self {
        Self {
            hits: Vec::new(),
            fail: true,
            last_query: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl SearchProvider for StubProvider {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SupplyResult>> {
        *self.last_query.lock().unwrap() = Some(query.to_string());
        if self.fail {
            return Err(TrendError::Search("provider unavailable".to_string()));
        }
        Ok(self.hits.iter().take(max_results).cloned().collect())
    }

    fn provider_name(&self) -> String {
        "stub".to_string()
    }
}

fn hit(title: &str, recency: &str) -> SupplyResult {
    SupplyResult {
        title: title.to_string(),
        link: format!("https://videos.example/{}", title.replace(' ', "-")),
        recency: recency.to_string(),
    }
}

#[tokio::test]
async fn test_many_recent_hits_is_saturated() {
    let hits: Vec<SupplyResult> = (0..6)
        .map(|i| hit(&format!("basement video {}", i), "2 days ago"))
        .collect();
    let scorer = GapScorer::new(Box::new(StubProvider::with_hits(hits)));

    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.verdict, GapVerdict::Saturated);
    assert_eq!(report.recent_count, 6);
    assert_eq!(report.results.len(), 6);
}

#[tokio::test]
async fn test_stale_hits_are_an_open_gap() {
    let scorer = GapScorer::new(Box::new(StubProvider::with_hits(vec![hit(
        "old basement video",
        "2 years ago",
    )])));

    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.verdict, GapVerdict::Open);
    assert_eq!(report.recent_count, 0);
    assert_eq!(report.results.len(), 1);
}

#[tokio::test]
async fn test_moderate_band_boundaries() {
    // Exactly 2 recent hits.
    let scorer = GapScorer::new(Box::new(StubProvider::with_hits(vec![
        hit("a", "3 days ago"),
        hit("b", "1 week ago"),
        hit("c", "4 years ago"),
    ])));
    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.verdict, GapVerdict::Moderate);
    assert_eq!(report.recent_count, 2);

    // Exactly 4 recent hits, still below the saturation threshold.
    let scorer = GapScorer::new(Box::new(StubProvider::with_hits(vec![
        hit("a", "5 hours ago"),
        hit("b", "2 days ago"),
        hit("c", "3 weeks ago"),
        hit("d", "1 month ago"),
    ])));
    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.verdict, GapVerdict::Moderate);
    assert_eq!(report.recent_count, 4);
}

#[tokio::test]
async fn test_provider_failure_is_no_data() {
    // Pinned policy: a failed search is NoData, not an open gap.
    let scorer = GapScorer::new(Box::new(StubProvider::failing()));

    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.verdict, GapVerdict::NoData);
    assert_eq!(report.recent_count, 0);
    assert!(report.results.is_empty());
}

#[tokio::test]
async fn test_empty_result_set_is_no_data() {
    // Pinned policy: zero hits is also NoData.
    let scorer = GapScorer::new(Box::new(StubProvider::with_hits(Vec::new())));

    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.verdict, GapVerdict::NoData);
    assert_eq!(report.recent_count, 0);
}

#[tokio::test]
async fn test_query_joins_keyword_and_qualifier() {
    let provider = StubProvider::with_hits(Vec::new());
    let recorded = provider.last_query.clone();
    let scorer = GapScorer::new(Box::new(provider));

    scorer.score("basement", "scary story", 10).await;
    let query = recorded.lock().unwrap().clone();
    assert_eq!(query.as_deref(), Some("basement scary story"));
}

#[tokio::test]
async fn test_max_results_bounds_hits() {
    let hits: Vec<SupplyResult> = (0..20)
        .map(|i| hit(&format!("video {}", i), "1 day ago"))
        .collect();
    let scorer = GapScorer::new(Box::new(StubProvider::with_hits(hits)));

    let report = scorer.score("basement", "scary story", 10).await;
    assert_eq!(report.results.len(), 10);
    assert_eq!(report.verdict, GapVerdict::Saturated);
}

#[test]
fn test_recency_markers_match_case_insensitively() {
    assert!(is_recent("2 Hours Ago"));
    assert!(is_recent("1 day ago"));
    assert!(is_recent("3 WEEKS ago"));
    assert!(is_recent("last month"));
    assert!(!is_recent("2 years ago"));
    assert!(!is_recent(""));
}
