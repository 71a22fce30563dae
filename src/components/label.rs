//! # Label Component
//!
//! One printed label: cut guide, logo, QR code, and caption.

use super::Component;
use crate::code::{DEFAULT_BASE_URL, ItemCode};
use crate::ir::{Op, Stroke};
use crate::layout::SlotGeometry;
use crate::media::LabelSize;

/// A single label at a fixed position.
///
/// ## Example
///
/// ```
/// use kairoframe::code::ItemCode;
/// use kairoframe::components::{ComponentExt, Label};
/// use kairoframe::media::{LabelSize, PageSpec};
///
/// let label = Label::new(ItemCode::from_number(7), LabelSize::MEDIUM)
///     .at(10.0, 10.0)
///     .base_url("https://inventory.example");
///
/// let ir = label.compile(PageSpec::A4);
/// assert_eq!(ir.label_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    code: ItemCode,
    size: LabelSize,
    x: f32,
    y: f32,
    base_url: String,
    logo: bool,
}

impl Label {
    /// Create a label at the page origin.
    pub fn new(code: ItemCode, size: LabelSize) -> Self {
        Self {
            code,
            size,
            x: 0.0,
            y: 0.0,
            base_url: DEFAULT_BASE_URL.to_string(),
            logo: true,
        }
    }

    /// Top-left corner in millimeters.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Site the QR code links to.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Skip the logo op.
    pub fn without_logo(mut self) -> Self {
        self.logo = false;
        self
    }

    pub fn geometry(&self) -> SlotGeometry {
        SlotGeometry::compute(self.x, self.y, self.size, &self.code.caption())
    }
}

impl Component for Label {
    fn emit(&self, ops: &mut Vec<Op>) {
        let geo = self.geometry();

        ops.push(Op::SetStroke(Stroke::CUT_GUIDE));
        ops.push(Op::Rect(geo.frame));
        if self.logo {
            ops.push(Op::Logo(geo.logo));
        }
        ops.push(Op::QrCode {
            data: self.code.public_url(&self.base_url),
            rect: geo.qr,
        });
        ops.push(Op::Text {
            content: geo.caption.text,
            font_size_pt: geo.caption.font_size_pt,
            center_x: geo.caption.center_x,
            top_y: geo.caption.top_y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_ops() {
        let label = Label::new(ItemCode::from_number(1), LabelSize::SMALL)
            .at(10.0, 10.0)
            .base_url("https://x.test");
        let mut ops = Vec::new();
        label.emit(&mut ops);

        assert_eq!(ops.len(), 5);
        assert_eq!(ops[0], Op::SetStroke(Stroke::CUT_GUIDE));
        assert!(matches!(ops[1], Op::Rect(r) if r.x == 10.0 && r.width == 60.0));
        assert!(matches!(ops[2], Op::Logo(_)));
        match &ops[3] {
            Op::QrCode { data, .. } => assert_eq!(data, "https://x.test/kf-0001"),
            other => panic!("expected QrCode, got {:?}", other),
        }
        match &ops[4] {
            Op::Text { content, .. } => assert_eq!(content, "KF-0001"),
            other => panic!("expected Text, got {:?}", other),
        }
    }

    #[test]
    fn test_label_without_logo() {
        let label = Label::new(ItemCode::from_number(1), LabelSize::SMALL).without_logo();
        let mut ops = Vec::new();
        label.emit(&mut ops);
        assert!(!ops.iter().any(|op| matches!(op, Op::Logo(_))));
    }
}
