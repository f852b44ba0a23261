//! Recommendation handler.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ApiError;
use crate::engine::Engine;

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    /// Maximum number of recommendations (1–20, default 5)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub product_ids: Vec<String>,
    pub reason: String,
}

/// Recommendations for a product id.
///
/// The existence filter gates the lookup: ids it rejects are 404. A filter
/// false positive passes the gate and returns an empty list with an empty
/// reason.
pub async fn handle_recommendations(
    State(engine): State<Arc<Engine>>,
    Path(product_id): Path<String>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let recommendation = engine.recommendations(&product_id, params.limit).await?;
    Ok(Json(RecommendationResponse {
        product_ids: recommendation.product_ids,
        reason: recommendation.reason,
    }))
}
