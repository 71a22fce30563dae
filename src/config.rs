//! # Label Settings
//!
//! Options shared by the CLI and the HTTP server when printing labels.

use std::path::PathBuf;

use crate::code::DEFAULT_BASE_URL;
use crate::media::PageSpec;
use crate::qr::DEFAULT_QR_PX;

/// How label sheets are rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSettings {
    /// Site the QR codes link to.
    pub base_url: String,
    /// Sheet the labels are printed on.
    pub page: PageSpec,
    /// Logo image drawn on every label; `None` prints without one.
    pub logo_path: Option<PathBuf>,
    /// QR raster width in pixels.
    pub qr_px: u32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page: PageSpec::A4,
            logo_path: None,
            qr_px: DEFAULT_QR_PX,
        }
    }
}
