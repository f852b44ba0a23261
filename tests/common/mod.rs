//! Shared test fixtures and utilities for integration tests.
//!
//! Each test gets its own `Engine` (no shared state), so tests run in
//! parallel without interference. `seed_catalog` loads the small shoe/boot
//! catalog most scenarios are written against.

use catalog_search::engine::{Engine, SearchFilters};
use catalog_search::types::Product;
use rstest::fixture;
use std::sync::Arc;

/// Build a product with the fields the engine indexes.
#[allow(dead_code)] // Used across different integration test crates
pub fn product(
    id: &str,
    title: &str,
    description: &str,
    categories: &[&str],
    price_cents: u64,
    stock: u32,
) -> Product {
    Product {
        product_id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        categories: categories.iter().map(|c| (*c).to_string()).collect(),
        price_cents,
        currency: "USD".to_string(),
        images: Vec::new(),
        stock,
        metadata: serde_json::Map::new(),
    }
}

/// A fresh, empty engine with default filter sizing.
#[fixture]
pub fn engine() -> Arc<Engine> {
    Arc::new(Engine::default())
}

/// Index the two-product shoe catalog used by the search scenarios.
#[allow(dead_code)] // Used across different integration test crates
pub async fn seed_catalog(engine: &Engine) {
    engine
        .index_product(product(
            "P1",
            "Red Running Shoes",
            "Lightweight trainers for daily runs",
            &["Shoes"],
            4999,
            3,
        ))
        .await;
    engine
        .index_product(product(
            "P2",
            "Blue Hiking Boots",
            "Waterproof walking shoes for rough trails",
            &["Shoes"],
            8999,
            1,
        ))
        .await;
}

/// Convenience: search filters with only a category set.
#[allow(dead_code)]
pub fn category_filter(category: &str) -> SearchFilters {
    SearchFilters {
        category: Some(category.to_string()),
        ..SearchFilters::default()
    }
}

/// Convenience: search filters with only a price band set.
#[allow(dead_code)]
pub fn price_filter(min_price: Option<u64>, max_price: Option<u64>) -> SearchFilters {
    SearchFilters {
        min_price,
        max_price,
        ..SearchFilters::default()
    }
}
