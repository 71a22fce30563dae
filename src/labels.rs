//! # Label Jobs
//!
//! End-to-end label printing: range text in, PDF bytes out.
//!
//! ```text
//! "1-10,15" ──► ranges ──► codes ──► LabelSheet ──► IR ──► PDF
//! ```
//!
//! ## Example
//!
//! ```
//! use kairoframe::config::LabelSettings;
//! use kairoframe::labels::{LabelJob, generate};
//! use kairoframe::media::LabelSize;
//!
//! let job = LabelJob::new("1-3", LabelSize::SMALL);
//! let out = generate(&job, &LabelSettings::default()).unwrap();
//! assert_eq!(out.filename, "labels-kf-0001-kf-0003.pdf");
//! assert_eq!(out.labels, 3);
//! assert!(out.pdf.starts_with(b"%PDF"));
//! ```

use image::DynamicImage;
use std::path::Path;
use tracing::{info, warn};

use crate::code::ItemCode;
use crate::components::{ComponentExt, LabelSheet};
use crate::config::LabelSettings;
use crate::error::{KairoError, RangeError};
use crate::ir::Assets;
use crate::media::LabelSize;
use crate::range::{self, CodeRange};

/// Most labels a single job may produce.
pub const MAX_LABELS: u64 = 10_000;

const PDF_TITLE: &str = "Kairoframe labels";

/// A request to print a batch of labels.
#[derive(Debug, Clone)]
pub struct LabelJob {
    /// Range text such as `"1-10,15,20-22"`.
    pub ranges: String,
    pub size: LabelSize,
    /// Drop malformed tokens instead of failing.
    pub lenient: bool,
}

impl LabelJob {
    pub fn new(ranges: impl Into<String>, size: LabelSize) -> Self {
        Self {
            ranges: ranges.into(),
            size,
            lenient: false,
        }
    }

    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}

/// A rendered label sheet.
#[derive(Debug, Clone)]
pub struct LabelOutput {
    pub pdf: Vec<u8>,
    /// Suggested download name, `labels-<first>-<last>.pdf`.
    pub filename: String,
    pub pages: usize,
    pub labels: usize,
}

/// Parse range text in strict or lenient mode.
pub fn resolve_ranges(input: &str, lenient: bool) -> Result<Vec<CodeRange>, RangeError> {
    if lenient {
        let ranges = range::parse(input);
        if ranges.is_empty() {
            return Err(RangeError::Empty);
        }
        Ok(ranges)
    } else {
        range::parse_strict(input)
    }
}

/// Download name for a batch: `labels-kf-0001-kf-0010.pdf`.
pub fn output_filename(codes: &[ItemCode]) -> Option<String> {
    let first = codes.first()?;
    let last = codes.last()?;
    Some(format!("labels-{}-{}.pdf", first, last))
}

/// Pick a label size from a preset id or explicit custom dimensions.
///
/// Custom dimensions win when both are given; neither means the default
/// preset.
pub fn resolve_size(
    preset: Option<&str>,
    width_mm: Option<f32>,
    height_mm: Option<f32>,
) -> Result<LabelSize, KairoError> {
    match (width_mm, height_mm) {
        (Some(w), Some(h)) => Ok(LabelSize::custom(w, h)?),
        (Some(_), None) | (None, Some(_)) => Err(KairoError::InvalidInput(
            "custom size needs both width and height".to_string(),
        )),
        (None, None) => match preset {
            Some(id) => LabelSize::by_name(id)
                .ok_or_else(|| KairoError::InvalidInput(format!("unknown label size '{}'", id))),
            None => Ok(LabelSize::default()),
        },
    }
}

/// Load the logo image, logging and skipping it if unreadable.
pub fn load_logo(path: &Path) -> Option<DynamicImage> {
    match image::open(path) {
        Ok(img) => Some(img),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "logo unavailable, printing without it");
            None
        }
    }
}

/// Render a job to PDF.
pub fn generate(job: &LabelJob, settings: &LabelSettings) -> Result<LabelOutput, KairoError> {
    let ranges = resolve_ranges(&job.ranges, job.lenient)?;

    let total = range::total_count(&ranges);
    if total > MAX_LABELS {
        return Err(KairoError::InvalidInput(format!(
            "{} labels requested, at most {} per sheet batch",
            total, MAX_LABELS
        )));
    }

    let codes = range::expand(&ranges);
    let filename = output_filename(&codes).ok_or(RangeError::Empty)?;

    let logo = settings.logo_path.as_deref().and_then(load_logo);

    let mut sheet =
        LabelSheet::new(&codes, job.size, settings.page)?.base_url(settings.base_url.as_str());
    let mut assets = match &logo {
        Some(img) => Assets::with_logo(img),
        None => {
            sheet = sheet.without_logo();
            Assets::default()
        }
    };
    assets.qr_px = settings.qr_px;

    let pdf = sheet.build(settings.page, PDF_TITLE, &assets)?;

    info!(
        labels = codes.len(),
        pages = sheet.page_count(),
        size = %format!("{}x{}", job.size.width_mm, job.size.height_mm),
        bytes = pdf.len(),
        "generated label sheet"
    );

    Ok(LabelOutput {
        pdf,
        filename,
        pages: sheet.page_count(),
        labels: codes.len(),
    })
}
