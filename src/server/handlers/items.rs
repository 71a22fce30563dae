//! Item handlers: code allocation, creation, and lookup.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, task_error};
use crate::allocator::next_code as allocate;
use crate::code::ItemCode;
use crate::error::{KairoError, StoreError};
use crate::model::{Item, ItemDraft};
use crate::qr;
use crate::server::state::AppState;

/// Handle GET /api/items/next-code - preview the next free code.
pub async fn next_code(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let store = state.store.read().await;
    let code = allocate(&*store)?;
    Ok(Json(json!({ "code": code })))
}

/// Handle POST /api/items - create an item, allocating a code if none given.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ItemDraft>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let mut store = state.store.write().await;
    let item = store.create(draft)?;
    if let Err(e) = state.persist(&store).await {
        store.remove(item.code.as_str());
        warn!(code = %item.code, "store save failed, create rolled back");
        return Err(e.into());
    }
    Ok((StatusCode::CREATED, Json(item)))
}

fn canonical_code(code: &str) -> Result<ItemCode, ApiError> {
    if !ItemCode::is_canonical(code) {
        return Err(KairoError::InvalidInput(format!("'{}' is not an item code", code)).into());
    }
    ItemCode::parse(code)
        .ok_or_else(|| KairoError::InvalidInput(format!("'{}' is not an item code", code)).into())
}

/// Handle GET /api/items/:code - look up one item.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let code = canonical_code(&code)?;

    let store = state.store.read().await;
    let item = store
        .get(code.as_str())
        .cloned()
        .ok_or_else(|| StoreError::NotFound(code.to_string()))?;
    Ok(Json(item))
}

/// Handle GET /api/items/:code/qr - PNG of the item's public-page QR code.
pub async fn qr_png(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let code = canonical_code(&code)?;
    let url = code.public_url(&state.config.labels.base_url);
    let size_px = state.config.labels.qr_px;

    let png_bytes = tokio::task::spawn_blocking(move || qr::render_png(&url, size_px))
        .await
        .map_err(task_error)??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}
