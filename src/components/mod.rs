//! # Declarative Components
//!
//! Components describe what goes on a sheet and emit IR ops.
//!
//! ## Example
//!
//! ```
//! use kairoframe::code::ItemCode;
//! use kairoframe::components::*;
//! use kairoframe::media::{LabelSize, PageSpec};
//!
//! let codes: Vec<ItemCode> = (1..=5).map(ItemCode::from_number).collect();
//! let sheet = LabelSheet::new(&codes, LabelSize::SMALL, PageSpec::A4).unwrap();
//!
//! // Compile to IR (inspectable)
//! let ir = sheet.compile(PageSpec::A4);
//! assert_eq!(ir.label_count(), 5);
//! ```
//!
//! ## Component Trait
//!
//! All components implement the `Component` trait, which emits IR ops.
//! A [`LabelSheet`] is a container of positioned [`Label`]s.

mod label;
mod sheet;

pub use label::*;
pub use sheet::*;

use crate::error::KairoError;
use crate::ir::{Assets, Op, Program};
use crate::media::PageSpec;

/// Trait for declarative components.
///
/// Components emit IR ops when compiled.
pub trait Component {
    /// Emit IR ops for this component into the ops vector.
    fn emit(&self, ops: &mut Vec<Op>);
}

/// Extension trait for compiling components.
pub trait ComponentExt: Component {
    /// Compile this component to an IR program on `page`.
    fn compile(&self, page: PageSpec) -> Program {
        let mut program = Program::new(page);
        self.emit(&mut program.ops);
        program
    }

    /// Compile, optimize, and generate PDF bytes.
    fn build(&self, page: PageSpec, title: &str, assets: &Assets) -> Result<Vec<u8>, KairoError> {
        self.compile(page).optimize().to_pdf(title, assets)
    }
}

// Blanket implementation for all components
impl<T: Component> ComponentExt for T {}

// Allow references to components
impl<T: Component + ?Sized> Component for &T {
    fn emit(&self, ops: &mut Vec<Op>) {
        (*self).emit(ops);
    }
}
