//! Field-weighted relevance re-ranking.
//!
//! The TF-IDF pass is a recall filter; survivors are rescored here and the
//! re-rank is the final ordering. The score is a field-weighted overlap
//! between the distinct query tokens and each field's token set, independent
//! of the TF-IDF score.

use ahash::AHashSet;

use super::tokenize::tokenize;
use crate::types::Product;

/// Weight per distinct query token found in the title.
const TITLE_WEIGHT: f64 = 3.0;
/// Weight per distinct query token found in the description.
const DESCRIPTION_WEIGHT: f64 = 1.0;
/// Weight per distinct query token matching a lowercased category label.
const CATEGORY_WEIGHT: f64 = 2.0;
/// Flat bonus for in-stock products.
const IN_STOCK_BONUS: f64 = 0.5;

/// Score a product against the distinct query token set.
pub fn relevance_score(product: &Product, query_tokens: &[String]) -> f64 {
    let distinct: AHashSet<&str> = query_tokens.iter().map(String::as_str).collect();

    let title: AHashSet<String> = tokenize(&product.title).into_iter().collect();
    let description: AHashSet<String> = tokenize(&product.description).into_iter().collect();
    let categories: AHashSet<String> =
        product.categories.iter().map(|c| c.to_lowercase()).collect();

    let overlap = |field: &AHashSet<String>| {
        distinct.iter().filter(|t| field.contains(**t)).count() as f64
    };

    let mut score = overlap(&title) * TITLE_WEIGHT
        + overlap(&description) * DESCRIPTION_WEIGHT
        + overlap(&categories) * CATEGORY_WEIGHT;

    if product.stock > 0 {
        score += IN_STOCK_BONUS;
    }

    score
}
