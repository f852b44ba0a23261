//! TF-IDF inverted index with incremental add/remove.
//!
//! Unlike a batch-built index, documents arrive and leave one at a time, so
//! posting lists, document frequencies and document lengths are maintained
//! incrementally. Invariants kept at every mutation:
//!
//! 1. `postings[t].len() == doc_freq[t] > 0` for every live token
//! 2. tokens with empty postings do not exist
//! 3. `total_docs == doc_lengths.len()`

use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;

use super::tokenize::{category_token, tokenize};

/// Insertion-ordered id → token-count map. Insertion order doubles as the
/// deterministic tie-breaker for equal search scores.
type DocLengths = IndexMap<String, usize, ahash::RandomState>;

/// A searchable term index with TF-IDF scoring.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// Map from token to the set of product ids containing it at least once
    postings: AHashMap<String, AHashSet<String>>,
    /// Map from token to the number of documents containing it
    doc_freq: AHashMap<String, usize>,
    /// Total token count per document, counting synthetic category tokens
    doc_lengths: DocLengths,
    total_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document, replacing any previous version of the same id.
    ///
    /// The token multiset is the tokenized `text` plus one synthetic
    /// `category:<name>` token per category. Replace safety: an id already
    /// present is fully removed first, so the index never holds a
    /// half-updated document.
    pub fn add_document(&mut self, id: &str, text: &str, categories: &[String]) {
        if self.doc_lengths.contains_key(id) {
            self.remove_document(id);
        }

        let mut tokens = tokenize(text);
        tokens.extend(categories.iter().map(|c| category_token(c)));

        self.doc_lengths.insert(id.to_string(), tokens.len());

        let unique: AHashSet<String> = tokens.into_iter().collect();
        for token in unique {
            let ids = self.postings.entry(token.clone()).or_default();
            if ids.insert(id.to_string()) {
                *self.doc_freq.entry(token).or_insert(0) += 1;
            }
        }

        self.total_docs = self.doc_lengths.len();
    }

    /// Remove a document and every posting that references it.
    ///
    /// Tokens whose posting set becomes empty are deleted outright, together
    /// with their document frequency. Returns false if the id was not
    /// indexed.
    pub fn remove_document(&mut self, id: &str) -> bool {
        if self.doc_lengths.shift_remove(id).is_none() {
            return false;
        }

        let doc_freq = &mut self.doc_freq;
        self.postings.retain(|token, ids| {
            if ids.remove(id) {
                if let Some(df) = doc_freq.get_mut(token) {
                    *df -= 1;
                }
            }
            if ids.is_empty() {
                doc_freq.remove(token);
                false
            } else {
                true
            }
        });

        self.total_docs = self.doc_lengths.len();
        true
    }

    /// Recall search: length-normalized TF-IDF over the query tokens.
    ///
    /// Each query token occurrence contributes `tf_norm * idf` to every
    /// document in its posting list, where `tf_norm = 1 / sqrt(doc_length)`
    /// and `idf = ln(total_docs / doc_freq)`. Tokens absent from the index
    /// contribute nothing. Results are sorted by descending score; equal
    /// scores keep document insertion order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(String, f64)> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scores: AHashMap<String, f64> = AHashMap::new();
        for token in &tokens {
            let Some(ids) = self.postings.get(token) else {
                continue;
            };
            let df = self.doc_freq.get(token).copied().unwrap_or(0);
            if df == 0 {
                continue;
            }
            let idf = (self.total_docs as f64 / df as f64).ln();

            for id in ids {
                let len = self.doc_lengths.get(id).copied().unwrap_or(1).max(1);
                let tf_norm = 1.0 / (len as f64).sqrt();
                *scores.entry(id.clone()).or_insert(0.0) += tf_norm * idf;
            }
        }

        let mut results: Vec<(String, f64)> = scores.into_iter().collect();
        results.sort_by(|(id_a, score_a), (id_b, score_b)| {
            score_b.total_cmp(score_a).then_with(|| {
                let order_a = self.doc_lengths.get_index_of(id_a).unwrap_or(usize::MAX);
                let order_b = self.doc_lengths.get_index_of(id_b).unwrap_or(usize::MAX);
                order_a.cmp(&order_b)
            })
        });
        results.truncate(limit);
        results
    }

    /// Whether an id is currently indexed.
    pub fn contains_document(&self, id: &str) -> bool {
        self.doc_lengths.contains_key(id)
    }

    /// Number of indexed documents.
    pub fn document_count(&self) -> usize {
        self.total_docs
    }

    /// Number of distinct live tokens.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Check the posting/doc-freq invariants (test support).
    #[cfg(test)]
    fn is_well_formed(&self) -> bool {
        if self.total_docs != self.doc_lengths.len() {
            return false;
        }
        if self.postings.len() != self.doc_freq.len() {
            return false;
        }
        self.postings.iter().all(|(token, ids)| {
            !ids.is_empty()
                && self.doc_freq.get(token) == Some(&ids.len())
                && ids.iter().all(|id| self.doc_lengths.contains_key(id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn ids(results: &[(String, f64)]) -> Vec<&str> {
        results.iter().map(|(id, _)| id.as_str()).collect()
    }

    #[test]
    fn test_add_and_search() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "red running shoes", &[]);
        index.add_document("P2", "blue hiking boots", &[]);

        let results = index.search("red", 10);
        check!(ids(&results) == vec!["P1"]);
        check!(results[0].1 > 0.0);
        check!(index.is_well_formed());
    }

    #[test]
    fn test_category_tokens_are_searchable() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "red shoes", &["Shoes".to_string()]);
        index.add_document("P2", "desk lamp", &["Lighting".to_string()]);

        // doc_lengths counts the synthetic token
        check!(index.doc_lengths.get("P1") == Some(&3));
        check!(index.postings.contains_key("category:shoes"));
        check!(index.is_well_formed());
    }

    #[test]
    fn test_idf_zero_when_token_everywhere() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "shoes", &[]);
        index.add_document("P2", "shoes", &[]);

        // ln(2/2) == 0: still a hit, score exactly zero
        let results = index.search("shoes", 10);
        check!(results.len() == 2);
        check!(results.iter().all(|(_, score)| *score == 0.0));
    }

    #[test]
    fn test_score_ties_keep_insertion_order() {
        let mut index = InvertedIndex::new();
        index.add_document("Z", "widget", &[]);
        index.add_document("A", "widget", &[]);

        check!(ids(&index.search("widget", 10)) == vec!["Z", "A"]);

        // Re-indexing Z makes it the newest insertion
        index.add_document("Z", "widget", &[]);
        check!(ids(&index.search("widget", 10)) == vec!["A", "Z"]);
    }

    #[test]
    fn test_replace_safety() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "alpha", &[]);
        index.add_document("P1", "beta", &[]);

        check!(index.search("alpha", 10).is_empty());
        check!(ids(&index.search("beta", 10)) == vec!["P1"]);
        check!(index.document_count() == 1);
        check!(index.is_well_formed());
    }

    #[test]
    fn test_remove_restores_empty_state() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "red shoes", &["Shoes".to_string()]);
        check!(index.remove_document("P1"));

        check!(index.document_count() == 0);
        check!(index.term_count() == 0);
        check!(index.doc_freq.is_empty());
        check!(index.doc_lengths.is_empty());
        check!(!index.remove_document("P1"));
    }

    #[test]
    fn test_remove_keeps_shared_tokens() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "red shoes", &[]);
        index.add_document("P2", "red boots", &[]);
        index.remove_document("P1");

        check!(index.doc_freq.get("red") == Some(&1));
        check!(!index.postings.contains_key("shoes"));
        check!(ids(&index.search("red", 10)) == vec!["P2"]);
        check!(index.is_well_formed());
    }

    #[test]
    fn test_unknown_token_does_not_abort() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "red shoes", &[]);

        let results = index.search("red zeppelin", 10);
        check!(ids(&results) == vec!["P1"]);
    }

    #[test]
    fn test_empty_query_and_empty_document() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "", &[]);

        check!(index.search("", 10).is_empty());
        check!(index.search("anything", 10).is_empty());
        check!(index.document_count() == 1);
        check!(index.doc_lengths.get("P1") == Some(&0));
        check!(index.is_well_formed());
    }

    #[test]
    fn test_duplicate_query_tokens_double_contribution() {
        let mut index = InvertedIndex::new();
        index.add_document("P1", "red shoes", &[]);
        index.add_document("P2", "blue shoes", &[]);

        let single = index.search("red", 10);
        let double = index.search("red red", 10);
        check!((double[0].1 - 2.0 * single[0].1).abs() < 1e-12);
    }

    #[test]
    fn test_limit_truncates() {
        let mut index = InvertedIndex::new();
        for i in 0..10 {
            index.add_document(&format!("P{i}"), "gadget", &[]);
        }
        check!(index.search("gadget", 3).len() == 3);
    }
}
