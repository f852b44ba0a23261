//! Co-view recording handler.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::engine::Engine;

#[derive(Debug, Deserialize)]
pub struct RecordViewRequest {
    pub product_id: String,
    /// Other products viewed in the same session; an empty list is a no-op
    #[serde(default)]
    pub session_products: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordViewAck {
    pub status: &'static str,
}

/// Record a product view for recommendation analytics.
pub async fn handle_record_view(
    State(engine): State<Arc<Engine>>,
    Json(request): Json<RecordViewRequest>,
) -> Json<RecordViewAck> {
    engine
        .record_view(&request.product_id, &request.session_products)
        .await;
    Json(RecordViewAck { status: "recorded" })
}
