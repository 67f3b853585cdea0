use crate::types::TrendReport;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tracing::debug;

/// TTL cache for extraction reports, keyed by the source list. Extraction
/// is idempotent within a short window, so the presentation layer caches
/// reports here instead of re-fetching on every render. A "refresh" action
/// maps to `invalidate_all`. The extractor itself never caches.
pub struct ReportCache {
    ttl: Duration,
    entries: HashMap<String, (DateTime<Utc>, TrendReport)>,
}

pub const DEFAULT_TTL_SECONDS: i64 = 600;

impl ReportCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_seconds),
            entries: HashMap::new(),
        }
    }

    fn key(sources: &[String]) -> String {
        sources.join(",")
    }

    /// A clone of the cached report for this source list, if still fresh.
    pub fn get(&self, sources: &[String]) -> Option<TrendReport> {
        let key = Self::key(sources);
        match self.entries.get(&key) {
            Some((stored_at, report)) if Utc::now().signed_duration_since(*stored_at) < self.ttl => {
                debug!("Cache hit for [{}]", key);
                Some(report.clone())
            }
            Some(_) => {
                debug!("Cache entry expired for [{}]", key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, sources: &[String], report: TrendReport) {
        self.entries.insert(Self::key(sources), (Utc::now(), report));
    }

    pub fn invalidate_all(&mut self) {
        debug!("Invalidating {} cached reports", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECONDS)
    }
}
