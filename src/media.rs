//! # Label and Page Media
//!
//! Physical dimensions for label stock and the sheet it is printed on.
//! All measurements are millimeters.
//!
//! ## Presets
//!
//! | Id | Size | Use |
//! |----|------|-----|
//! | `60x20` | 60 × 20 mm | small (default) |
//! | `70x25` | 70 × 25 mm | medium |
//! | `80x30` | 80 × 30 mm | large |
//! | `50x30` | 50 × 30 mm | square-ish |
//!
//! ## Sheet grid
//!
//! ```text
//! labels_per_row    = floor((page_width  - 2·margin) / label_width)
//! labels_per_column = floor((page_height - 2·margin) / label_height)
//!
//! A4 (210×297, margin 10) with 60×20 labels:
//!   floor(190 / 60) = 3 per row
//!   floor(277 / 20) = 13 per column
//!   39 labels per page
//! ```

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Label dimensions. Pure value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

/// A named label size offered to users.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LabelPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub size: LabelSize,
}

/// Accepted width range for custom labels.
pub const CUSTOM_WIDTH_MM: (f32, f32) = (20.0, 200.0);

/// Accepted height range for custom labels.
pub const CUSTOM_HEIGHT_MM: (f32, f32) = (10.0, 100.0);

impl LabelSize {
    pub const SMALL: Self = Self::new(60.0, 20.0);
    pub const MEDIUM: Self = Self::new(70.0, 25.0);
    pub const LARGE: Self = Self::new(80.0, 30.0);
    pub const SQUARE: Self = Self::new(50.0, 30.0);

    pub const fn new(width_mm: f32, height_mm: f32) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// User-supplied size, checked against the custom bounds.
    pub fn custom(width_mm: f32, height_mm: f32) -> Result<Self, LayoutError> {
        let in_range = |v: f32, (lo, hi): (f32, f32)| v.is_finite() && v >= lo && v <= hi;
        if !in_range(width_mm, CUSTOM_WIDTH_MM) {
            return Err(LayoutError::InvalidSize(format!(
                "width {}mm outside {}-{}mm",
                width_mm, CUSTOM_WIDTH_MM.0, CUSTOM_WIDTH_MM.1
            )));
        }
        if !in_range(height_mm, CUSTOM_HEIGHT_MM) {
            return Err(LayoutError::InvalidSize(format!(
                "height {}mm outside {}-{}mm",
                height_mm, CUSTOM_HEIGHT_MM.0, CUSTOM_HEIGHT_MM.1
            )));
        }
        Ok(Self::new(width_mm, height_mm))
    }

    /// Look up a preset by id (e.g. `"70x25"`).
    pub fn by_name(id: &str) -> Option<Self> {
        PRESETS.iter().find(|p| p.id == id).map(|p| p.size)
    }
}

impl Default for LabelSize {
    fn default() -> Self {
        Self::SMALL
    }
}

/// All presets, default first.
pub const PRESETS: &[LabelPreset] = &[
    LabelPreset {
        id: "60x20",
        name: "6cm x 2cm (small)",
        size: LabelSize::SMALL,
    },
    LabelPreset {
        id: "70x25",
        name: "7cm x 2.5cm (medium)",
        size: LabelSize::MEDIUM,
    },
    LabelPreset {
        id: "80x30",
        name: "8cm x 3cm (large)",
        size: LabelSize::LARGE,
    },
    LabelPreset {
        id: "50x30",
        name: "5cm x 3cm (square)",
        size: LabelSize::SQUARE,
    },
];

/// Sheet dimensions and the blank border around the label grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl PageSpec {
    /// A4 portrait, 10mm margin.
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 10.0,
    };

    pub fn printable_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn printable_height(&self) -> f32 {
        self.height_mm - 2.0 * self.margin_mm
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::A4
    }
}

/// How many labels fit on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SheetGrid {
    pub labels_per_row: usize,
    pub labels_per_column: usize,
}

impl SheetGrid {
    /// Grid capacity for `label` on `page`.
    ///
    /// Never panics; a label larger than the printable area (or a
    /// non-positive label dimension) gives zero capacity on that axis.
    pub fn compute(page: &PageSpec, label: LabelSize) -> Self {
        Self {
            labels_per_row: fit(page.printable_width(), label.width_mm),
            labels_per_column: fit(page.printable_height(), label.height_mm),
        }
    }

    pub fn labels_per_page(&self) -> usize {
        self.labels_per_row * self.labels_per_column
    }

    /// No label fits on the page.
    pub fn is_degenerate(&self) -> bool {
        self.labels_per_page() == 0
    }

    /// Pages needed for `count` labels (0 when degenerate or empty).
    pub fn pages_for(&self, count: usize) -> usize {
        match self.labels_per_page() {
            0 => 0,
            per_page => count.div_ceil(per_page),
        }
    }
}

fn fit(available: f32, size: f32) -> usize {
    if size.is_nan() || available.is_nan() || size <= 0.0 || available <= 0.0 {
        return 0;
    }
    (available / size).floor() as usize
}
