//! Autocomplete suggestion handler.

use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ApiError;
use crate::engine::Engine;

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    /// Partial query; fewer than two characters after trimming yields an
    /// empty suggestion list
    pub q: String,
    /// Maximum number of suggestions (1–20, default 10)
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<String>,
}

/// Most popular completions of a partial token, best first.
pub async fn handle_autocomplete(
    State(engine): State<Arc<Engine>>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let suggestions = engine.autocomplete(&params.q, params.limit).await?;
    Ok(Json(AutocompleteResponse { suggestions }))
}
