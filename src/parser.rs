use crate::types::{Result, TrendError};
use feed_rs::parser;
use tracing::debug;

/// Administrative tags stripped out of titles before analysis.
pub const ADMIN_MARKERS: [&str; 2] = ["[Mod Post]", "[Announcement]"];

/// Parse a syndication document and return the titles of its entries.
/// Entries without a title are skipped.
pub fn parse_titles(content: &str) -> Result<Vec<String>> {
    let feed = parser::parse(content.as_bytes())
        .map_err(|e| TrendError::Parse(format!("Failed to parse feed: {}", e)))?;

    let titles: Vec<String> = feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title.map(|t| t.content))
        .collect();

    debug!("Parsed feed with {} titled entries", titles.len());
    Ok(titles)
}

/// Remove administrative markers from a raw title and trim the remainder.
/// Case is preserved; the cleaned original-case string is what deduplication
/// operates on.
pub fn clean_title(raw: &str) -> String {
    let mut clean = raw.to_string();
    for marker in ADMIN_MARKERS {
        clean = clean.replace(marker, "");
    }
    clean.trim().to_string()
}
