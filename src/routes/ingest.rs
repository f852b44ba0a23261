//! Product ingest handler.

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;

use crate::engine::Engine;
use crate::types::Product;

#[derive(Debug, Serialize)]
pub struct IndexAck {
    pub status: &'static str,
    pub product_id: String,
}

/// Index a product for search. Re-submitting an id replaces the previous
/// version across every substructure.
pub async fn handle_index_product(
    State(engine): State<Arc<Engine>>,
    Json(product): Json<Product>,
) -> Json<IndexAck> {
    let product_id = engine.index_product(product).await;
    Json(IndexAck {
        status: "indexed",
        product_id,
    })
}
