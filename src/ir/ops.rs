//! # IR Opcodes
//!
//! This module defines the intermediate representation (IR) for label
//! sheets. The IR is a sequence of drawing opcodes that can be inspected,
//! optimized, and compiled to PDF.
//!
//! ## Design Philosophy
//!
//! The IR sits between the label components and the PDF writer:
//!
//! ```text
//! Components → IR (inspectable) → Optimizer → Codegen → PDF bytes
//! ```
//!
//! Coordinates are millimeters from the top-left corner of the page. The
//! first page is implicit; `NewPage` starts each following one.

use crate::layout::Rect;
use crate::media::PageSpec;

/// Stroke color and width for outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub rgb: [u8; 3],
    pub width_mm: f32,
}

impl Stroke {
    /// Light grey hairline used for cut guides.
    pub const CUT_GUIDE: Self = Self {
        rgb: [200, 200, 200],
        width_mm: 0.1,
    };
}

/// IR opcodes - the drawing primitives of a label sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Start a new page.
    NewPage,

    /// Set the outline style for following `Rect` ops.
    SetStroke(Stroke),

    /// Outline a rectangle.
    Rect(Rect),

    /// Draw the logo asset, aspect-fit and centered in the box.
    Logo(Rect),

    /// Draw a QR code encoding `data`, scaled to the box.
    QrCode { data: String, rect: Rect },

    /// Helvetica-Bold text, centered on `center_x`, top edge at `top_y`.
    Text {
        content: String,
        font_size_pt: f32,
        center_x: f32,
        top_y: f32,
    },
}

/// A compiled IR program for one sheet layout.
#[derive(Debug, Clone)]
pub struct Program {
    pub page: PageSpec,
    pub ops: Vec<Op>,
}

impl Program {
    /// Create an empty program for `page`.
    pub fn new(page: PageSpec) -> Self {
        Self {
            page,
            ops: Vec::new(),
        }
    }

    /// Add an op to the program.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Get the number of ops in the program.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the program is empty.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over ops.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }

    /// Pages the program draws on (0 for an empty program).
    pub fn page_count(&self) -> usize {
        if self.ops.is_empty() {
            return 0;
        }
        1 + self.ops.iter().filter(|op| matches!(op, Op::NewPage)).count()
    }

    /// Number of QR codes, one per label.
    pub fn label_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::QrCode { .. }))
            .count()
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Op;
    type IntoIter = std::slice::Iter<'a, Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}
