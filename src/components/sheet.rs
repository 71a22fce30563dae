//! # Label Sheet Component
//!
//! The root container: a batch of labels laid out across pages.

use super::{Component, Label};
use crate::code::{DEFAULT_BASE_URL, ItemCode};
use crate::error::LayoutError;
use crate::ir::Op;
use crate::layout::{LabelPlacement, layout};
use crate::media::{LabelSize, PageSpec};

/// A batch of labels placed on one or more pages.
///
/// Placement is computed once at construction; emitting is pure.
#[derive(Debug, Clone)]
pub struct LabelSheet {
    placements: Vec<LabelPlacement>,
    size: LabelSize,
    page: PageSpec,
    base_url: String,
    logo: bool,
}

impl LabelSheet {
    /// Lay out `codes` in order. Fails if the label does not fit the page.
    pub fn new(codes: &[ItemCode], size: LabelSize, page: PageSpec) -> Result<Self, LayoutError> {
        Ok(Self {
            placements: layout(codes, size, &page)?,
            size,
            page,
            base_url: DEFAULT_BASE_URL.to_string(),
            logo: true,
        })
    }

    /// Site the QR codes link to.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Drop the logo from every label.
    pub fn without_logo(mut self) -> Self {
        self.logo = false;
        self
    }

    pub fn placements(&self) -> &[LabelPlacement] {
        &self.placements
    }

    pub fn page(&self) -> PageSpec {
        self.page
    }

    /// Pages used (0 for an empty sheet).
    pub fn page_count(&self) -> usize {
        self.placements.last().map_or(0, |p| p.page_index + 1)
    }
}

impl Component for LabelSheet {
    fn emit(&self, ops: &mut Vec<Op>) {
        let mut current_page = 0;

        for placement in &self.placements {
            while current_page < placement.page_index {
                ops.push(Op::NewPage);
                current_page += 1;
            }

            let mut label = Label::new(placement.code.clone(), self.size)
                .at(placement.x, placement.y)
                .base_url(self.base_url.as_str());
            if !self.logo {
                label = label.without_logo();
            }
            label.emit(ops);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentExt;

    fn codes(n: u32) -> Vec<ItemCode> {
        (1..=n).map(ItemCode::from_number).collect()
    }

    #[test]
    fn test_sheet_pages() {
        let sheet = LabelSheet::new(&codes(40), LabelSize::SMALL, PageSpec::A4).unwrap();
        assert_eq!(sheet.page_count(), 2);

        let program = sheet.compile(sheet.page());
        assert_eq!(program.page_count(), 2);
        assert_eq!(program.label_count(), 40);
    }

    #[test]
    fn test_empty_sheet_emits_nothing() {
        let sheet = LabelSheet::new(&[], LabelSize::SMALL, PageSpec::A4).unwrap();
        assert_eq!(sheet.page_count(), 0);
        assert!(sheet.compile(PageSpec::A4).is_empty());
    }

    #[test]
    fn test_qr_payloads_follow_input_order() {
        let input = vec![ItemCode::from_number(9), ItemCode::from_number(3)];
        let sheet = LabelSheet::new(&input, LabelSize::SMALL, PageSpec::A4)
            .unwrap()
            .base_url("https://x.test");
        let payloads: Vec<String> = sheet
            .compile(PageSpec::A4)
            .iter()
            .filter_map(|op| match op {
                Op::QrCode { data, .. } => Some(data.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(payloads, vec!["https://x.test/kf-0009", "https://x.test/kf-0003"]);
    }

    #[test]
    fn test_optimized_sheet_sets_stroke_once_per_page() {
        let sheet = LabelSheet::new(&codes(40), LabelSize::SMALL, PageSpec::A4).unwrap();
        let program = sheet.compile(PageSpec::A4).optimize();
        let strokes = program
            .iter()
            .filter(|op| matches!(op, Op::SetStroke(_)))
            .count();
        assert_eq!(strokes, 2);
    }
}
