//! Region scanning: trace every boundary in the grid and group the
//! resulting subpaths by exact color.
//!
//! Cells are visited in row-major order and each cell's corners in
//! [`Corner::ALL`] order, so output ordering is reproducible: colors appear
//! in the order they are first met, and within a color the outer boundary
//! of a region always precedes the holes found inside it.

use std::collections::HashMap;

use crate::corner::Corner;
use crate::grid::PixelGrid;
use crate::trace::trace_boundary;
use crate::types::{Color, ColorPath};
use crate::visited::CornerTracker;

/// Outcome of a full scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput {
    /// One path per non-transparent color, in first-encountered order.
    pub paths: Vec<ColorPath>,
    /// Number of distinct (cell, corner) states the tracer walked.
    pub corners_visited: usize,
    /// Number of tracer steps taken. Equal to `corners_visited` when no
    /// state was walked twice.
    pub tracer_steps: usize,
}

/// Trace all non-transparent regions of `grid`.
///
/// Transparent cells (`a == 0`) are never traced. Colors are compared by
/// exact equality including alpha.
#[must_use = "returns the traced paths"]
pub fn scan_regions<G: PixelGrid + ?Sized>(grid: &G) -> ScanOutput {
    let (width, height) = (grid.width(), grid.height());
    let mut tracker = CornerTracker::new(width, height);
    let mut paths: Vec<ColorPath> = Vec::new();
    let mut index_of: HashMap<Color, usize> = HashMap::new();

    for y in 0..height {
        for x in 0..width {
            let Some(color) = grid.get(i64::from(x), i64::from(y)) else {
                continue;
            };
            if color.is_transparent() {
                continue;
            }

            for corner in Corner::ALL {
                if tracker.visited(x, y, corner) {
                    continue;
                }
                let subpath = trace_boundary(grid, &mut tracker, color, x, y, corner);
                if subpath.is_empty() {
                    continue;
                }

                let i = *index_of.entry(color).or_insert_with(|| {
                    paths.push(ColorPath {
                        color,
                        subpaths: Vec::new(),
                    });
                    paths.len() - 1
                });
                paths[i].subpaths.push(subpath);
            }
        }
    }

    ScanOutput {
        paths,
        corners_visited: tracker.visited_count(),
        tracer_steps: tracker.steps(),
    }
}
