//! # Label Sheet Layout
//!
//! Places a list of codes onto a grid of pages, row-major, left to right,
//! top to bottom. Output order equals input order and the same inputs
//! always give the same placements.
//!
//! ```text
//! i            = label index in the flattened code list
//! page_index   = i / labels_per_page
//! index_in_pg  = i % labels_per_page
//! row          = index_in_pg / labels_per_row
//! column       = index_in_pg % labels_per_row
//! x            = margin + column · label_width
//! y            = margin + row    · label_height
//! ```
//!
//! Coordinates are millimeters from the top-left corner of the page.
//!
//! ## Slot anatomy
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │ ┌──────┐                      ┌────────┐   │
//! │ │ logo │       (free 20%)     │   QR   │   │
//! │ │      │                      │        │   │
//! │ └──────┘                      └────────┘   │
//! │                                KF-0001     │
//! └────────────────────────────────────────────┘
//!  ◄─ 40% ─►                     ◄── 40% ──►
//! ```

use serde::Serialize;

use crate::code::ItemCode;
use crate::error::LayoutError;
use crate::media::{LabelSize, PageSpec, SheetGrid};
use crate::metrics;

/// Where one label lands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub page_index: usize,
    pub row: usize,
    pub column: usize,
    pub x: f32,
    pub y: f32,
    pub code: ItemCode,
}

/// Compute placements for `codes`.
///
/// An empty code list yields no placements. A label that does not fit the
/// printable area is reported as [`LayoutError::LabelDoesNotFit`].
pub fn layout(
    codes: &[ItemCode],
    label: LabelSize,
    page: &PageSpec,
) -> Result<Vec<LabelPlacement>, LayoutError> {
    if codes.is_empty() {
        return Ok(Vec::new());
    }

    let grid = SheetGrid::compute(page, label);
    if grid.is_degenerate() {
        return Err(LayoutError::LabelDoesNotFit {
            label_width: label.width_mm,
            label_height: label.height_mm,
            printable_width: page.printable_width(),
            printable_height: page.printable_height(),
        });
    }

    let per_page = grid.labels_per_page();
    let placements = codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let index_in_page = i % per_page;
            let row = index_in_page / grid.labels_per_row;
            let column = index_in_page % grid.labels_per_row;
            LabelPlacement {
                page_index: i / per_page,
                row,
                column,
                x: page.margin_mm + column as f32 * label.width_mm,
                y: page.margin_mm + row as f32 * label.height_mm,
                code: code.clone(),
            }
        })
        .collect();

    Ok(placements)
}

/// Axis-aligned box in millimeters, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies entirely inside `self` (with float slack).
    pub fn contains(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// Share of the slot width given to the logo (left) and to the QR (right).
pub const AREA_RATIO: f32 = 0.4;
/// Maximum share of the slot height the QR may take.
pub const QR_HEIGHT_RATIO: f32 = 0.7;
/// Gap between the slot's top edge and the QR.
pub const QR_TOP_MARGIN_MM: f32 = 2.0;
/// Gap between the QR and the caption.
pub const CAPTION_GAP_MM: f32 = 0.5;
/// Trial caption size, as a fraction of the QR size.
pub const CAPTION_TRIAL_RATIO: f32 = 0.5;
/// Caption size ceiling, as a fraction of the QR size.
pub const CAPTION_MAX_RATIO: f32 = 0.6;

/// Caption text, sized to span the QR width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
    pub text: String,
    pub font_size_pt: f32,
    /// Horizontal center of the text.
    pub center_x: f32,
    /// Top of the text box.
    pub top_y: f32,
    /// Rendered width at `font_size_pt`.
    pub width: f32,
}

/// Boxes for everything drawn inside one label slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotGeometry {
    pub frame: Rect,
    pub logo: Rect,
    pub qr: Rect,
    pub caption: Caption,
}

impl SlotGeometry {
    /// Geometry for the slot at `(x, y)`.
    pub fn compute(x: f32, y: f32, label: LabelSize, caption: &str) -> Self {
        let (w, h) = (label.width_mm, label.height_mm);
        let frame = Rect::new(x, y, w, h);

        // Square logo centered in the left area, 0.5mm from the slot edge
        let logo_area = w * AREA_RATIO;
        let logo_size = (logo_area - 1.0).min(h - 1.0).max(0.0);
        let logo = Rect::new(
            x + 0.5 + (logo_area - 1.0 - logo_size) / 2.0,
            y + (h - logo_size) / 2.0,
            logo_size,
            logo_size,
        );

        // QR centered in the right area, pinned near the top
        let qr_area = w * AREA_RATIO;
        let qr_area_x = x + w - qr_area;
        let qr_size = (qr_area - 1.0).min(h * QR_HEIGHT_RATIO - 1.0).max(0.0);
        let qr = Rect::new(
            qr_area_x + (qr_area - qr_size) / 2.0,
            y + QR_TOP_MARGIN_MM,
            qr_size,
            qr_size,
        );

        let font_size_pt = metrics::fit_font_size(
            caption,
            qr_size * CAPTION_TRIAL_RATIO,
            qr_size,
            qr_size * CAPTION_MAX_RATIO,
        );
        let caption = Caption {
            text: caption.to_string(),
            font_size_pt,
            center_x: qr_area_x + qr_area / 2.0,
            top_y: qr.bottom() + CAPTION_GAP_MM,
            width: metrics::text_width_mm(caption, font_size_pt),
        };

        Self {
            frame,
            logo,
            qr,
            caption,
        }
    }

    /// Geometry for a placement, captioned with its upper-case code.
    pub fn for_placement(placement: &LabelPlacement, label: LabelSize) -> Self {
        Self::compute(placement.x, placement.y, label, &placement.code.caption())
    }
}
