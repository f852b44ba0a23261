//! Co-view recommendations with category fallback.
//!
//! The co-view matrix is directional: `record_view(a, [b, c])` increments
//! `a→b` and `a→c` only. When co-views alone cannot fill a request, members
//! of the product's categories top the list up, in declared category order.

use ahash::{AHashMap, AHashSet};

use crate::types::PriceBucket;

/// Outcome of a recommendation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub product_ids: Vec<String>,
    pub reason: String,
}

/// Co-view counts plus the category and price-bucket metadata indices.
#[derive(Debug, Default)]
pub struct RecommendEngine {
    /// `focus → (partner → count)`; not symmetric by construction
    co_views: AHashMap<String, AHashMap<String, u64>>,
    /// lowercased category → member ids
    categories: AHashMap<String, AHashSet<String>>,
    /// bucket → member ids, rebuilt on replace so it holds no duplicates
    price_buckets: AHashMap<PriceBucket, Vec<String>>,
}

impl RecommendEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `focus` was viewed alongside `session_products`.
    ///
    /// Each occurrence counts, so a product repeated in the session
    /// increments its pair count repeatedly. The focus itself is skipped.
    pub fn record_view(&mut self, focus: &str, session_products: &[String]) {
        for other in session_products {
            if other != focus {
                *self
                    .co_views
                    .entry(focus.to_string())
                    .or_default()
                    .entry(other.clone())
                    .or_insert(0) += 1;
            }
        }
    }

    /// Register a product's categories and price bucket.
    pub fn add_product_metadata(&mut self, id: &str, categories: &[String], price_cents: u64) {
        for category in categories {
            self.categories
                .entry(category.to_lowercase())
                .or_default()
                .insert(id.to_string());
        }
        self.price_buckets
            .entry(PriceBucket::from_price_cents(price_cents))
            .or_default()
            .push(id.to_string());
    }

    /// Remove a product from the category and price-bucket indices.
    ///
    /// Used on replace: re-indexing rebuilds metadata but keeps the co-view
    /// history intact.
    pub fn remove_product_metadata(&mut self, id: &str) {
        self.categories.retain(|_, members| {
            members.remove(id);
            !members.is_empty()
        });
        for members in self.price_buckets.values_mut() {
            members.retain(|member| member != id);
        }
        self.price_buckets.retain(|_, members| !members.is_empty());
    }

    /// Full removal: metadata plus the product's own co-view row. Partner
    /// counts inside other rows are history and stay.
    pub fn remove_product(&mut self, id: &str) {
        self.co_views.remove(id);
        self.remove_product_metadata(id);
    }

    /// Top-`limit` recommendations for `id`.
    ///
    /// Co-viewed partners come first (descending count, ties by ascending
    /// id). If fewer than `limit` were produced and the caller knows the
    /// product's categories, category members fill the remainder in declared
    /// category order, ascending id within a category. The reason names the
    /// first category that contributed a fill-in; with no co-views and no
    /// fill-ins the reason is empty. The focus id is never included and the
    /// result holds no duplicates.
    pub fn recommend(
        &self,
        id: &str,
        limit: usize,
        fallback_categories: Option<&[String]>,
    ) -> Recommendation {
        let mut picked: Vec<String> = Vec::new();
        let mut reason = String::new();

        if let Some(partners) = self.co_views.get(id) {
            let mut ranked: Vec<(&String, u64)> =
                partners.iter().map(|(partner, count)| (partner, *count)).collect();
            ranked.sort_by(|(id_a, count_a), (id_b, count_b)| {
                count_b.cmp(count_a).then_with(|| id_a.cmp(id_b))
            });
            picked.extend(ranked.into_iter().take(limit).map(|(partner, _)| partner.clone()));
            if !picked.is_empty() {
                reason = "frequently viewed together".to_string();
            }
        }

        if picked.len() < limit
            && let Some(categories) = fallback_categories
        {
            let mut fill_category: Option<&String> = None;

            'categories: for category in categories {
                let Some(members) = self.categories.get(&category.to_lowercase()) else {
                    continue;
                };

                let mut candidates: Vec<&String> =
                    members.iter().filter(|member| *member != id).collect();
                candidates.sort();

                for candidate in candidates {
                    if picked.iter().any(|existing| existing == candidate) {
                        continue;
                    }
                    picked.push(candidate.clone());
                    fill_category.get_or_insert(category);
                    if picked.len() >= limit {
                        break 'categories;
                    }
                }
            }

            if let Some(category) = fill_category {
                reason = format!("similar products in {category}");
            }
        }

        Recommendation {
            product_ids: picked,
            reason,
        }
    }

    /// Whether any views have been recorded for `id`.
    pub fn has_views(&self, id: &str) -> bool {
        self.co_views.get(id).is_some_and(|partners| !partners.is_empty())
    }
}
