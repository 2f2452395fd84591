//! Path assembly: turn per-color subpaths into serializer-ready fill paths.
//!
//! Holes need no bookkeeping here. They wind opposite to their enclosing
//! boundary and are rendered with [`FillRule::EvenOdd`], so they subtract
//! whichever way a renderer counts winding.

use crate::types::{ColorPath, FillPath, FillRule};

/// Convert one color path into its emission unit.
#[must_use]
pub fn assemble_path(path: ColorPath) -> FillPath {
    FillPath {
        color: path.color,
        opacity: path.color.opacity(),
        fill_rule: FillRule::EvenOdd,
        subpaths: path.subpaths,
    }
}

/// Convert every color path, preserving color order.
#[must_use = "returns the assembled fill paths"]
pub fn assemble_paths(paths: Vec<ColorPath>) -> Vec<FillPath> {
    paths.into_iter().map(assemble_path).collect()
}
