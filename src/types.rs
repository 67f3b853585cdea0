use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Keyword -> titles it appeared in, insertion order, one entry per occurrence.
pub type KeywordIndex = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedKeyword {
    pub keyword: String,
    pub count: usize,
}

/// Diagnostic for one failed feed endpoint. Collected, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    pub source: String,
    pub url: String,
    pub error: String,
}

/// Output of one demand extraction over a group of sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendReport {
    pub ranking: Vec<RankedKeyword>,
    pub index: KeywordIndex,
    pub total_items: usize,
    pub failures: Vec<SourceFailure>,
    pub generated_at: DateTime<Utc>,
}

impl TrendReport {
    /// Occurrence count as a percentage of unique titles. None when no titles
    /// were collected, so callers never divide by zero.
    pub fn saturation_pct(&self, count: usize) -> Option<f64> {
        if self.total_items == 0 {
            None
        } else {
            Some(count as f64 / self.total_items as f64 * 100.0)
        }
    }

    /// Up to `limit` example titles for a ranked keyword.
    pub fn example_titles(&self, keyword: &str, limit: usize) -> &[String] {
        match self.index.get(keyword) {
            Some(titles) => &titles[..titles.len().min(limit)],
            None => &[],
        }
    }
}

/// One video-search hit. Field names vary across providers (`content` vs
/// `link`, `published` vs `publishedTime`), normalized here via aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyResult {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "content")]
    pub link: String,
    #[serde(default, alias = "published", alias = "publishedTime")]
    pub recency: String,
}

/// Market saturation classification for one keyword.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GapVerdict {
    /// Search failed or returned nothing; no signal either way.
    NoData,
    /// Plenty of recent competing uploads.
    Saturated,
    /// Some recent competition.
    Moderate,
    /// Little to no recent competition.
    Open,
}

impl fmt::Display for GapVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GapVerdict::NoData => "NO_DATA",
            GapVerdict::Saturated => "SATURATED",
            GapVerdict::Moderate => "MODERATE",
            GapVerdict::Open => "OPEN",
        };
        write!(f, "{}", label)
    }
}

/// Output of one supply gap scoring call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapReport {
    pub verdict: GapVerdict,
    pub recent_count: usize,
    pub results: Vec<SupplyResult>,
}

impl GapReport {
    pub fn no_data() -> Self {
        Self {
            verdict: GapVerdict::NoData,
            recent_count: 0,
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "trend-hunter/0.1".to_string(),
            timeout_seconds: 10,
            max_retries: 2,
            retry_delay_seconds: 2,
            max_redirects: 5,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Search provider error: {0}")]
    Search(String),

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, TrendError>;
