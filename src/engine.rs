//! The engine facade orchestrating every substructure.
//!
//! `Engine` is constructed once and shared by reference across request
//! handlers. It owns the cross-structure invariant: every id in the product
//! store also appears in the inverted index, the autocomplete trie (title
//! tokens and categories), the existence filter and the category/price
//! metadata indices.
//!
//! Concurrency: mutating operations serialize on an internal write lock;
//! read operations share a read lock and run in parallel against a
//! consistent snapshot. Query analytics sit behind their own mutex so that
//! concurrent searches never contend on the engine write lock. All
//! operations are CPU-bound and run to completion without awaiting.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tokio::sync::{Mutex, RwLock};

use crate::analytics::SearchAnalytics;
use crate::autocomplete::AutocompleteTrie;
use crate::error::EngineError;
use crate::existence::{DEFAULT_CAPACITY, DEFAULT_ERROR_RATE, ExistenceFilter};
use crate::recommend::{Recommendation, RecommendEngine};
use crate::search::{InvertedIndex, relevance_score, tokenize};
use crate::store::ProductStore;
use crate::types::{Product, SearchHit};

/// Search result limit bounds and default.
const SEARCH_LIMIT: RangeInclusive<usize> = 1..=100;
const SEARCH_LIMIT_DEFAULT: usize = 20;

/// Autocomplete limit bounds and default.
const AUTOCOMPLETE_LIMIT: RangeInclusive<usize> = 1..=20;
const AUTOCOMPLETE_LIMIT_DEFAULT: usize = 10;

/// Recommendation limit bounds and default.
const RECOMMEND_LIMIT: RangeInclusive<usize> = 1..=20;
const RECOMMEND_LIMIT_DEFAULT: usize = 5;

/// Minimum trimmed prefix length before autocomplete returns suggestions.
const AUTOCOMPLETE_MIN_PREFIX: usize = 2;

/// Title tokens this short carry too little signal for suggestions.
const SUGGESTION_MIN_TOKEN_LEN: usize = 3;

/// The analytics report exposes this many top queries.
const TOP_SEARCHES: usize = 20;

/// The recall pool fetches this multiple of the requested limit so the
/// filter stage has slack to discard.
const RECALL_FACTOR: usize = 2;

/// Engine construction parameters.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub filter_capacity: usize,
    pub filter_error_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            filter_capacity: DEFAULT_CAPACITY,
            filter_error_rate: DEFAULT_ERROR_RATE,
        }
    }
}

/// Optional search filters, echoed back in the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    pub category: Option<String>,
    /// Minimum price in cents, inclusive.
    pub min_price: Option<u64>,
    /// Maximum price in cents, inclusive.
    pub max_price: Option<u64>,
}

/// A completed search: re-ranked hits plus the echoed query and filters.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total: usize,
    pub query: String,
    pub filters: SearchFilters,
}

/// One entry of the analytics top-searches list.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QueryCount {
    pub query: String,
    pub count: u64,
}

/// Aggregate search analytics.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub top_searches: Vec<QueryCount>,
    pub total_searches: u64,
    pub unique_queries: usize,
    pub indexed_products: usize,
}

/// Readiness snapshot for the health probe.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub indexed_products: usize,
    pub index_size: usize,
    pub filter_capacity: usize,
}

/// Every index structure, guarded together by the engine's write lock.
#[derive(Debug)]
struct EngineCore {
    store: ProductStore,
    index: InvertedIndex,
    autocomplete: AutocompleteTrie,
    existence: ExistenceFilter,
    recommend: RecommendEngine,
}

impl EngineCore {
    fn new(config: EngineConfig) -> Self {
        Self {
            store: ProductStore::new(),
            index: InvertedIndex::new(),
            autocomplete: AutocompleteTrie::new(),
            existence: ExistenceFilter::new(config.filter_capacity, config.filter_error_rate),
            recommend: RecommendEngine::new(),
        }
    }
}

/// The search and recommendation engine.
pub struct Engine {
    config: EngineConfig,
    core: RwLock<EngineCore>,
    analytics: Mutex<SearchAnalytics>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            core: RwLock::new(EngineCore::new(config)),
            analytics: Mutex::new(SearchAnalytics::new()),
        }
    }

    /// Index a product across every substructure, replace-safe.
    ///
    /// Returns the acknowledged product id.
    pub async fn index_product(&self, product: Product) -> String {
        let id = product.product_id.clone();
        let mut core = self.core.write().await;

        // Replace path: metadata indices are rebuilt, co-view history stays
        if core.store.contains(&id) {
            core.recommend.remove_product_metadata(&id);
        }

        core.index
            .add_document(&id, &product.searchable_text(), &product.categories);

        for token in tokenize(&product.title) {
            if token.len() >= SUGGESTION_MIN_TOKEN_LEN {
                core.autocomplete.insert(&token);
            }
        }
        for category in &product.categories {
            core.autocomplete.insert(category);
        }

        core.existence.add(&id);
        core.recommend
            .add_product_metadata(&id, &product.categories, product.price_cents);
        core.store.insert(product);

        tracing::info!(
            product_id = %id,
            indexed_products = core.store.len(),
            "Indexed product"
        );
        id
    }

    /// Remove a product and its derived entries.
    ///
    /// The existence filter and the trie cannot subtract; their entries
    /// remain and downstream paths tolerate that. Returns false for an
    /// unknown id.
    pub async fn remove_product(&self, id: &str) -> bool {
        let mut core = self.core.write().await;
        if core.store.remove(id).is_none() {
            return false;
        }
        core.index.remove_document(id);
        core.recommend.remove_product(id);
        tracing::info!(product_id = %id, "Removed product");
        true
    }

    /// Free-text search with filtering and field-weighted re-ranking.
    ///
    /// The TF-IDF pass over-fetches by [`RECALL_FACTOR`], survivors of the
    /// category/price filters are collected until `limit` are found, and the
    /// final ordering is the relevance re-rank (stable, so ties keep recall
    /// order).
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
        filters: SearchFilters,
    ) -> Result<SearchResponse, EngineError> {
        let limit = validate_limit(limit, SEARCH_LIMIT, SEARCH_LIMIT_DEFAULT)?;
        if query.trim().is_empty() {
            return Err(EngineError::bad_request("query must not be empty"));
        }

        self.analytics.lock().await.record(query);

        let core = self.core.read().await;
        let candidates = core.index.search(query, limit * RECALL_FACTOR);
        let query_tokens = tokenize(query);

        let mut results = Vec::new();
        for (id, _recall_score) in candidates {
            let Some(product) = core.store.get(&id) else {
                continue;
            };

            if let Some(category) = &filters.category {
                let wanted = category.to_lowercase();
                if !product.categories.iter().any(|c| c.to_lowercase() == wanted) {
                    continue;
                }
            }
            if let Some(min_price) = filters.min_price
                && product.price_cents < min_price
            {
                continue;
            }
            if let Some(max_price) = filters.max_price
                && product.price_cents > max_price
            {
                continue;
            }

            results.push(SearchHit {
                product_id: product.product_id.clone(),
                title: product.title.clone(),
                score: relevance_score(product, &query_tokens),
                price_cents: product.price_cents,
                currency: product.currency.clone(),
                stock: product.stock,
            });

            if results.len() >= limit {
                break;
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(query, hits = results.len(), "Search completed");
        Ok(SearchResponse {
            total: results.len(),
            results,
            query: query.to_string(),
            filters,
        })
    }

    /// Most popular completions of a partial token.
    ///
    /// A trimmed prefix shorter than two characters yields an empty list;
    /// that is a success, not an error.
    pub async fn autocomplete(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<String>, EngineError> {
        let limit = validate_limit(limit, AUTOCOMPLETE_LIMIT, AUTOCOMPLETE_LIMIT_DEFAULT)?;
        let prefix = query.trim();
        if prefix.chars().count() < AUTOCOMPLETE_MIN_PREFIX {
            return Ok(Vec::new());
        }

        let core = self.core.read().await;
        Ok(core.autocomplete.search_prefix(prefix, limit))
    }

    /// Recommendations for a viewed product.
    ///
    /// The existence filter is the gate: a miss is `NotFound`. A filter
    /// false positive passes the gate and simply yields an empty list with
    /// an empty reason.
    pub async fn recommendations(
        &self,
        product_id: &str,
        limit: Option<usize>,
    ) -> Result<Recommendation, EngineError> {
        let limit = validate_limit(limit, RECOMMEND_LIMIT, RECOMMEND_LIMIT_DEFAULT)?;

        let core = self.core.read().await;
        if !core.existence.contains(product_id) {
            return Err(EngineError::not_found(product_id));
        }

        let categories = core.store.get(product_id).map(|p| p.categories.as_slice());
        Ok(core.recommend.recommend(product_id, limit, categories))
    }

    /// Record a product view with its session context.
    ///
    /// Missing pieces degrade to a no-op rather than an error.
    pub async fn record_view(&self, product_id: &str, session_products: &[String]) {
        if product_id.is_empty() || session_products.is_empty() {
            return;
        }
        let mut core = self.core.write().await;
        core.recommend.record_view(product_id, session_products);
        tracing::debug!(product_id, co_viewed = session_products.len(), "Recorded view");
    }

    /// Aggregate query analytics plus the live product count.
    pub async fn analytics_report(&self) -> AnalyticsReport {
        let indexed_products = self.core.read().await.store.len();
        let analytics = self.analytics.lock().await;
        AnalyticsReport {
            top_searches: analytics
                .top_searches(TOP_SEARCHES)
                .into_iter()
                .map(|(query, count)| QueryCount { query, count })
                .collect(),
            total_searches: analytics.total_searches(),
            unique_queries: analytics.unique_queries(),
            indexed_products,
        }
    }

    /// Readiness snapshot.
    pub async fn stats(&self) -> EngineStats {
        let core = self.core.read().await;
        EngineStats {
            indexed_products: core.store.len(),
            index_size: core.index.document_count(),
            filter_capacity: core.existence.capacity(),
        }
    }

    /// Atomically return every structure to its empty initial state.
    ///
    /// In-flight reads may complete against the pre-reset state and return
    /// valid results from it.
    pub async fn reset(&self) {
        let mut core = self.core.write().await;
        let mut analytics = self.analytics.lock().await;
        *core = EngineCore::new(self.config);
        *analytics = SearchAnalytics::new();
        tracing::info!("Engine reset to empty state");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Validate an optional limit against its bounds, applying the default.
fn validate_limit(
    limit: Option<usize>,
    bounds: RangeInclusive<usize>,
    default: usize,
) -> Result<usize, EngineError> {
    let limit = limit.unwrap_or(default);
    if bounds.contains(&limit) {
        Ok(limit)
    } else {
        Err(EngineError::bad_request(format!(
            "limit must be between {} and {}",
            bounds.start(),
            bounds.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn product(id: &str, title: &str, categories: &[&str], price_cents: u64, stock: u32) -> Product {
        Product {
            product_id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
            price_cents,
            currency: "USD".to_string(),
            images: Vec::new(),
            stock,
            metadata: serde_json::Map::new(),
        }
    }

    #[tokio::test]
    async fn test_limit_validation() {
        let engine = Engine::default();

        let err = engine
            .search("shoes", Some(0), SearchFilters::default())
            .await
            .unwrap_err();
        check!(matches!(err, EngineError::BadRequest { .. }));

        let err = engine
            .search("shoes", Some(101), SearchFilters::default())
            .await
            .unwrap_err();
        check!(matches!(err, EngineError::BadRequest { .. }));

        let err = engine.autocomplete("cam", Some(21)).await.unwrap_err();
        check!(matches!(err, EngineError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_empty_query_is_bad_request_and_not_counted() {
        let engine = Engine::default();

        let err = engine
            .search("   ", None, SearchFilters::default())
            .await
            .unwrap_err();
        check!(matches!(err, EngineError::BadRequest { .. }));

        let report = engine.analytics_report().await;
        check!(report.total_searches == 0);
    }

    #[tokio::test]
    async fn test_index_then_search_roundtrip() {
        let engine = Engine::default();
        engine
            .index_product(product("P1", "Red Running Shoes", &["Shoes"], 4999, 3))
            .await;

        let response = engine
            .search("red", None, SearchFilters::default())
            .await
            .unwrap();
        check!(response.total == 1);
        check!(response.results[0].product_id == "P1");
    }

    #[tokio::test]
    async fn test_short_title_tokens_skip_autocomplete() {
        let engine = Engine::default();
        engine
            .index_product(product("P1", "4K TV by ACME", &[], 99_999, 1))
            .await;

        // "tv" and "by" are too short; "acme" qualifies
        check!(engine.autocomplete("tv", None).await.unwrap().is_empty());
        check!(engine.autocomplete("acme", None).await.unwrap() == vec!["acme"]);
    }

    #[tokio::test]
    async fn test_reset_restores_empty_state() {
        let engine = Engine::default();
        engine
            .index_product(product("P1", "Red Shoes", &["Shoes"], 4999, 3))
            .await;
        engine
            .search("red", None, SearchFilters::default())
            .await
            .unwrap();
        engine.record_view("P1", &["P2".to_string()]).await;

        engine.reset().await;

        let stats = engine.stats().await;
        check!(stats.indexed_products == 0);
        check!(stats.index_size == 0);

        let report = engine.analytics_report().await;
        check!(report.total_searches == 0);
        check!(report.unique_queries == 0);

        check!(engine.autocomplete("red", None).await.unwrap().is_empty());
        let err = engine.recommendations("P1", None).await.unwrap_err();
        check!(matches!(err, EngineError::NotFound { .. }));
    }
}
