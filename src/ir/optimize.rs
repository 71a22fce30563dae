//! # IR Optimizer
//!
//! Every label re-emits its stroke style so labels stay self-contained.
//! The optimizer drops style changes that would not change anything.
//!
//! ## Optimization Passes
//!
//! 1. **Remove redundant strokes**: skip `SetStroke` equal to the active one
//! 2. **Drop trailing page breaks**: a `NewPage` with nothing after it

use super::ops::{Op, Program, Stroke};

impl Program {
    /// Apply all optimization passes.
    pub fn optimize(self) -> Self {
        let ops = remove_redundant_strokes(self.ops);
        let ops = drop_trailing_page_breaks(ops);
        Program {
            page: self.page,
            ops,
        }
    }
}

/// Stroke state is per page, so it resets on `NewPage`.
fn remove_redundant_strokes(ops: Vec<Op>) -> Vec<Op> {
    let mut result = Vec::with_capacity(ops.len());
    let mut active: Option<Stroke> = None;

    for op in ops {
        match op {
            Op::SetStroke(stroke) if active == Some(stroke) => continue,
            Op::SetStroke(stroke) => {
                active = Some(stroke);
                result.push(op);
            }
            Op::NewPage => {
                active = None;
                result.push(op);
            }
            other => result.push(other),
        }
    }

    result
}

fn drop_trailing_page_breaks(mut ops: Vec<Op>) -> Vec<Op> {
    while matches!(ops.last(), Some(Op::NewPage)) {
        ops.pop();
    }
    ops
}
