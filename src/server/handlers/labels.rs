//! Label sheet handlers: size presets, range preview, and PDF download.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use super::{ApiError, task_error};
use crate::labels::{self, LabelJob};
use crate::media::{CUSTOM_HEIGHT_MM, CUSTOM_WIDTH_MM, PRESETS};
use crate::range::{self, CodeRange};
use crate::server::state::AppState;

/// Handle GET /api/labels/sizes - list presets and custom bounds.
pub async fn sizes() -> Json<Value> {
    Json(json!({
        "presets": PRESETS,
        "custom": {
            "width": { "min": CUSTOM_WIDTH_MM.0, "max": CUSTOM_WIDTH_MM.1 },
            "height": { "min": CUSTOM_HEIGHT_MM.0, "max": CUSTOM_HEIGHT_MM.1 },
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub ranges: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub ranges: Vec<CodeRange>,
    pub total: u64,
    pub summary: String,
    pub rejected: Vec<String>,
}

/// Handle POST /api/labels/summary - parse ranges and report what would print.
///
/// Always lenient, so the UI can show the valid part alongside the
/// rejected tokens while the user is still typing.
pub async fn summary(Json(req): Json<SummaryRequest>) -> Json<SummaryResponse> {
    let (ranges, rejected) = range::parse_report(&req.ranges);
    Json(SummaryResponse {
        total: range::total_count(&ranges),
        summary: range::summary(&ranges),
        rejected: rejected.iter().map(ToString::to_string).collect(),
        ranges,
    })
}

/// Form data for PDF generation.
#[derive(Debug, Deserialize)]
pub struct PdfRequest {
    /// Range text, e.g. "1-10,15"
    pub ranges: String,
    /// Preset id, e.g. "70x25"
    #[serde(default)]
    pub size: Option<String>,
    /// Custom width in mm (with `height`)
    #[serde(default)]
    pub width: Option<f32>,
    /// Custom height in mm (with `width`)
    #[serde(default)]
    pub height: Option<f32>,
    /// Drop malformed range tokens instead of rejecting the request
    #[serde(default)]
    pub lenient: bool,
}

/// Handle POST /api/labels/pdf - render the sheet and return it as a download.
pub async fn pdf(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PdfRequest>,
) -> Result<Response, ApiError> {
    let size = labels::resolve_size(req.size.as_deref(), req.width, req.height)?;
    let job = LabelJob::new(req.ranges, size).lenient(req.lenient);
    let settings = state.config.labels.clone();

    // PDF rendering is CPU-bound
    let output = tokio::task::spawn_blocking(move || labels::generate(&job, &settings))
        .await
        .map_err(task_error)??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", output.filename),
            ),
        ],
        output.pdf,
    )
        .into_response())
}
