//! HTTP route handlers and error mapping.
//!
//! One file per operation; this module assembles the router and owns the
//! `EngineError` to status-code mapping. Handlers stay thin; validation and
//! semantics live in the engine.

pub mod analytics;
pub mod autocomplete;
pub mod ingest;
pub mod recommend;
pub mod search;
pub mod views;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use serde::Serialize;
use std::sync::Arc;

use crate::engine::{Engine, EngineStats};
use crate::error::EngineError;

/// Build the full application router.
pub fn router(engine: Arc<Engine>) -> axum::Router {
    axum::Router::new()
        .route("/api/search/index/product", post(ingest::handle_index_product))
        .route("/api/search", get(search::handle_search))
        .route("/api/search/autocomplete", get(autocomplete::handle_autocomplete))
        .route(
            "/api/search/recommendations/{product_id}",
            get(recommend::handle_recommendations),
        )
        .route("/api/search/analytics/view", post(views::handle_record_view))
        .route("/api/search/analytics", get(analytics::handle_analytics))
        .route("/health", get(handle_health))
        .route("/admin/clear", delete(handle_clear))
        .with_state(engine)
}

/// `EngineError` carried across the handler boundary.
///
/// Client-visible errors echo their message; internal faults are logged in
/// full and surfaced opaquely.
#[derive(Debug)]
pub struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            EngineError::BadRequest { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            EngineError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            EngineError::Internal { .. } => {
                tracing::error!(error = ?self.0, "Internal engine fault");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Readiness signal: engine status plus index statistics.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub stats: EngineStats,
}

pub async fn handle_health(State(engine): State<Arc<Engine>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "catalog-search",
        stats: engine.stats().await,
    })
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Admin reset: atomically replaces every structure with a fresh instance.
pub async fn handle_clear(State(engine): State<Arc<Engine>>) -> Json<ClearResponse> {
    engine.reset().await;
    Json(ClearResponse {
        status: "cleared",
        message: "All search data has been cleared",
    })
}
