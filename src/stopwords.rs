/// Words excluded from keyword ranking no matter how often they occur.
/// Kept as one sorted table so the set can grow without touching the
/// extraction logic. Sorted, so membership is a binary search.
pub const STOP_WORDS: [&str; 67] = [
    "a",
    "about",
    "advice",
    "all",
    "an",
    "and",
    "anyone",
    "are",
    "at",
    "be",
    "but",
    "by",
    "confession",
    "dating",
    "do",
    "else",
    "final",
    "for",
    "found",
    "from",
    "has",
    "have",
    "he",
    "help",
    "horror",
    "how",
    "i",
    "in",
    "is",
    "it",
    "just",
    "know",
    "like",
    "looking",
    "me",
    "my",
    "no",
    "not",
    "of",
    "on",
    "one",
    "out",
    "part",
    "people",
    "question",
    "reddit",
    "relationship",
    "scary",
    "series",
    "she",
    "so",
    "story",
    "that",
    "the",
    "they",
    "this",
    "time",
    "to",
    "up",
    "update",
    "want",
    "was",
    "we",
    "what",
    "when",
    "with",
    "would",
];

/// Tokens shorter than this never count as keywords.
pub const MIN_KEYWORD_CHARS: usize = 4;

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// A normalized token qualifies as a keyword when it is long enough and
/// not a stop word.
pub fn is_keyword(token: &str) -> bool {
    token.chars().count() >= MIN_KEYWORD_CHARS && !is_stop_word(token)
}
