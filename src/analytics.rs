//! Search query analytics.

use ahash::AHashMap;

/// Per-query counters, keyed by the lowercased query string.
#[derive(Debug, Default)]
pub struct SearchAnalytics {
    counts: AHashMap<String, u64>,
}

impl SearchAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one execution of `query` (case-folded).
    pub fn record(&mut self, query: &str) {
        *self.counts.entry(query.to_lowercase()).or_insert(0) += 1;
    }

    /// The `limit` most frequent queries, descending by count with ties
    /// broken by ascending query string.
    pub fn top_searches(&self, limit: usize) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(query, count)| (query.clone(), *count))
            .collect();
        ranked.sort_by(|(query_a, count_a), (query_b, count_b)| {
            count_b.cmp(count_a).then_with(|| query_a.cmp(query_b))
        });
        ranked.truncate(limit);
        ranked
    }

    /// Total searches across all queries.
    pub fn total_searches(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct (case-folded) queries seen.
    pub fn unique_queries(&self) -> usize {
        self.counts.len()
    }
}
