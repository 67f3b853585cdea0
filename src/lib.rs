pub mod types;
pub mod stopwords;
pub mod fetcher;
pub mod parser;
pub mod extractor;
pub mod search;
pub mod scorer;
pub mod cache;

pub use types::*;
pub use fetcher::Fetcher;
pub use extractor::{DemandExtractor, TitleSet};
pub use search::{SearchProvider, VideoSearch};
pub use scorer::GapScorer;
pub use cache::ReportCache;
