//! Free-text search handler.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;

use super::ApiError;
use crate::engine::{Engine, SearchFilters, SearchResponse};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query (required, non-empty)
    pub q: String,
    /// Maximum number of results (1–100, default 20)
    pub limit: Option<usize>,
    pub category: Option<String>,
    /// Minimum price in cents, inclusive
    pub min_price: Option<u64>,
    /// Maximum price in cents, inclusive
    pub max_price: Option<u64>,
}

/// Search products with optional category and price filtering.
pub async fn handle_search(
    State(engine): State<Arc<Engine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let filters = SearchFilters {
        category: params.category,
        min_price: params.min_price,
        max_price: params.max_price,
    };
    let response = engine.search(&params.q, params.limit, filters).await?;
    Ok(Json(response))
}
