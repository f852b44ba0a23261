//! Search analytics handler.

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use crate::engine::{AnalyticsReport, Engine};

/// Aggregate search analytics: top-20 queries, totals, indexed products.
pub async fn handle_analytics(State(engine): State<Arc<Engine>>) -> Json<AnalyticsReport> {
    Json(engine.analytics_report().await)
}
