//! # Intermediate Representation (IR)
//!
//! This module provides the IR layer for label sheets. The IR is a flat
//! list of drawing ops that sits between the label components and the PDF
//! writer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌───────────┐     ┌──────────┐
//! │ Components  │ ──► │     IR      │ ──► │ Optimizer │ ──► │ Codegen  │
//! │(label, sheet)│    │  (Vec<Op>)  │     │           │     │  (PDF)   │
//! └─────────────┘     └─────────────┘     └───────────┘     └──────────┘
//! ```
//!
//! ## Benefits of IR
//!
//! 1. **Inspectable**: tests assert on positions without parsing PDF
//! 2. **Optimizable**: redundant style changes are removed
//! 3. **Backend-neutral**: QR rasterization happens only at codegen
//!
//! ## Example
//!
//! ```
//! use kairoframe::ir::{Assets, Op, Program, Stroke};
//! use kairoframe::layout::Rect;
//! use kairoframe::media::PageSpec;
//!
//! let mut program = Program::new(PageSpec::A4);
//! program.push(Op::SetStroke(Stroke::CUT_GUIDE));
//! program.push(Op::Rect(Rect::new(10.0, 10.0, 60.0, 20.0)));
//! program.push(Op::QrCode {
//!     data: "https://kairoframe.lobo99.info/kf-0001".into(),
//!     rect: Rect::new(51.5, 12.0, 13.0, 13.0),
//! });
//!
//! let pdf = program.optimize().to_pdf("labels", &Assets::default()).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod codegen;
mod ops;
mod optimize;

// Re-export the ops types (codegen and optimize add methods to Program via impl)
pub use codegen::Assets;
pub use ops::*;
