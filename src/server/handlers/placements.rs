//! Shelf and location pages: the items stored at one node.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::ApiError;
use crate::model::{Item, PlacementRef};
use crate::server::state::AppState;

async fn list(state: &AppState, placement: PlacementRef) -> Result<Json<Value>, ApiError> {
    let placement = placement.canonical()?;
    let store = state.store.read().await;
    let items: Vec<Item> = store.items_at(&placement).cloned().collect();
    Ok(Json(json!({ "code": placement.id(), "items": items })))
}

/// Handle GET /api/shelves/:code/items - items on a shelf (`ES-0001`, `es-0001` or `0001`).
pub async fn shelf_items(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    list(&state, PlacementRef::Shelf(code)).await
}

/// Handle GET /api/locations/:code/items - items at a location.
pub async fn location_items(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    list(&state, PlacementRef::Location(code)).await
}
