//! Scanner handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use super::ApiError;
use crate::code::ItemCode;
use crate::error::KairoError;
use crate::server::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Raw text decoded from a QR code
    pub payload: String,
}

/// Handle POST /api/scan - resolve a scanned payload to an item code.
///
/// Responds with the code and, when the item exists, the item itself.
pub async fn scan(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<Value>, ApiError> {
    let code = ItemCode::from_scan(req.payload.trim()).ok_or_else(|| {
        KairoError::InvalidInput("scanned code is not a valid item code".to_string())
    })?;

    let store = state.store.read().await;
    let item = store.get(code.as_str()).cloned();
    Ok(Json(json!({ "code": code, "item": item })))
}
