use crate::fetcher::Fetcher;
use crate::parser::{clean_title, parse_titles};
use crate::stopwords::is_keyword;
use crate::types::{FetchConfig, KeywordIndex, RankedKeyword, SourceFailure, TrendReport};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

const DEFAULT_FEED_BASE: &str = "https://www.reddit.com";

/// Deduplicating, insertion-ordered collection of cleaned titles for one
/// extraction call. Dedup happens on the cleaned original-case string,
/// before any lowering, so case-variant titles stay distinct.
#[derive(Debug, Default)]
pub struct TitleSet {
    titles: Vec<String>,
    seen: HashSet<String>,
}

impl TitleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clean a raw title and add it unless already present. Empty titles
    /// (after marker stripping) are skipped. Returns true when added.
    pub fn add_raw(&mut self, raw: &str) -> bool {
        let clean = clean_title(raw);
        if clean.is_empty() {
            return false;
        }
        if self.seen.insert(clean.clone()) {
            self.titles.push(clean);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.titles.iter()
    }
}

/// Lower-case a cleaned title, drop punctuation, split on whitespace.
/// Punctuation characters are deleted, not replaced with spaces, so
/// "don't" tokenizes to "dont".
pub fn tokenize(title: &str) -> Vec<String> {
    let normalized: String = title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    normalized.split_whitespace().map(str::to_string).collect()
}

/// Count keyword occurrences over a title set and rank them. Ranking is
/// descending by count with lexicographic tie-break so runs are
/// deterministic. The index covers every keyword, not just the cutoff.
pub fn rank_titles(titles: &TitleSet, cutoff: usize) -> (Vec<RankedKeyword>, KeywordIndex) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut index: KeywordIndex = HashMap::new();

    for title in titles.iter() {
        for token in tokenize(title) {
            if !is_keyword(&token) {
                continue;
            }
            *counts.entry(token.clone()).or_insert(0) += 1;
            index.entry(token).or_default().push(title.clone());
        }
    }

    let mut ranking: Vec<RankedKeyword> = counts
        .into_iter()
        .map(|(keyword, count)| RankedKeyword { keyword, count })
        .collect();

    ranking.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    ranking.truncate(cutoff);

    (ranking, index)
}

/// Fetches recent titles for a group of sources and ranks the keywords
/// that appear in them. Endpoint failures are collected as diagnostics;
/// a failing source contributes zero titles and never aborts the call.
pub struct DemandExtractor {
    fetcher: Fetcher,
    feed_base: String,
}

impl DemandExtractor {
    pub fn new(config: FetchConfig) -> Self {
        Self {
            fetcher: Fetcher::new(config),
            feed_base: DEFAULT_FEED_BASE.to_string(),
        }
    }

    /// Override the feed host, mainly for tests against stub servers.
    pub fn with_feed_base(mut self, base: impl Into<String>) -> Self {
        self.feed_base = base.into();
        self
    }

    /// The two feed endpoints queried per source: currently-hot items and
    /// top items of the past week.
    pub fn endpoints(&self, source: &str) -> [String; 2] {
        [
            format!("{}/r/{}/hot.rss", self.feed_base, source),
            format!("{}/r/{}/top/.rss?t=week", self.feed_base, source),
        ]
    }

    /// Fetch, clean, deduplicate, tokenize, count, rank. Infallible at the
    /// call level: with no sources or with every fetch failing, the report
    /// is empty with `total_items == 0`.
    pub async fn extract(&self, sources: &[String], cutoff: usize) -> TrendReport {
        let mut titles = TitleSet::new();
        let mut failures = Vec::new();

        for source in sources {
            for url in self.endpoints(source) {
                let outcome = match self.fetcher.fetch_text(&url).await {
                    Ok(body) => parse_titles(&body),
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(raw_titles) => {
                        let mut added = 0;
                        for raw in &raw_titles {
                            if titles.add_raw(raw) {
                                added += 1;
                            }
                        }
                        debug!("Source {}: {} new titles from {}", source, added, url);
                    }
                    Err(e) => {
                        warn!("Source {} endpoint failed ({}): {}", source, url, e);
                        failures.push(SourceFailure {
                            source: source.clone(),
                            url,
                            error: e.to_string(),
                        });
                    }
                }
            }
        }

        let total_items = titles.len();
        let (ranking, index) = rank_titles(&titles, cutoff);

        info!(
            "Extracted {} keywords from {} unique titles across {} sources ({} endpoint failures)",
            ranking.len(),
            total_items,
            sources.len(),
            failures.len()
        );

        TrendReport {
            ranking,
            index,
            total_items,
            failures,
            generated_at: Utc::now(),
        }
    }
}
