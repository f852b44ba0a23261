//! Text tokenization utilities for search indexing.

use regex::Regex;
use std::sync::LazyLock;

/// Word extractor: a letter followed by letters or digits, at word
/// boundaries. `"3abc"` yields nothing; `"abc3 def"` yields `abc3`, `def`.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9]*\b").expect("word pattern is valid"));

/// Tokenizes free text into lowercase word tokens.
///
/// No stemming, no stop-word removal, no Unicode normalization beyond ASCII
/// letter recognition. Empty input yields an empty vec; this function never
/// fails.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_ascii_lowercase())
        .collect()
}

/// The synthetic index token for a category label.
///
/// Category tokens bypass the word extractor, so a query containing the
/// literal substring `category:shoes` can score category postings directly.
pub fn category_token(category: &str) -> String {
    format!("category:{}", category.to_lowercase())
}
