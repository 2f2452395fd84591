//! Boundary tracing: the corner-rotation state machine.
//!
//! The tracer walks the boundary of a single-color region with the region
//! on its right, one (cell, corner) state at a time. At each state it
//! looks at the three other cells meeting at that corner's lattice point
//! and either emits a vertex and walks the current cell's next edge, or
//! hands the walk over to a same-colored neighbour without emitting.
//!
//! Every state is marked in the [`CornerTracker`] before it is processed
//! and the walk stops as soon as it reaches a marked state, so each
//! boundary is produced exactly once and the polygon closes implicitly.
//!
//! Pixels touching only at a corner are kept apart: the diagonal
//! neighbour is consulted only when the edge neighbour already matches,
//! so regions are followed with 4-connectivity.

use crate::corner::{Corner, Probe};
use crate::grid::PixelGrid;
use crate::types::{Color, Point, Subpath};
use crate::visited::CornerTracker;

/// Follow the boundary of `color` starting at `corner` of cell `(x, y)`.
///
/// Returns the vertices emitted before the walk reached an already
/// visited state. The result is empty when the start state was already
/// visited, when it is a corner fully surrounded by `color`, or when it
/// only leads into a boundary an earlier call has produced.
///
/// The starting cell must lie inside the grid and hold `color`.
pub fn trace_boundary<G: PixelGrid + ?Sized>(
    grid: &G,
    tracker: &mut CornerTracker,
    color: Color,
    x: u32,
    y: u32,
    corner: Corner,
) -> Subpath {
    let mut points = Vec::new();
    let (mut x, mut y, mut corner) = (x, y, corner);

    loop {
        if tracker.visited(x, y, corner) {
            break;
        }
        tracker.visit(x, y, corner);

        let t = corner.transition();
        let matches = |p: &Probe| {
            grid.get(i64::from(x) + p.offset.0, i64::from(y) + p.offset.1) == Some(color)
        };
        let (c1, c2, c3) = (matches(&t.edge), matches(&t.diagonal), matches(&t.trailing));

        let hop = match (c1, c2, c3) {
            // Interior corner: nothing to emit from here.
            (true, true, true) => break,
            (true, true, false) => t.diagonal,
            (true, false, _) => t.edge,
            (false, _, _) => {
                let (dx, dy) = t.vertex;
                points.push(Point::new(x + dx, y + dy));
                corner = t.next;
                continue;
            }
        };

        // Out-of-grid probes never match, so the hop target is in the grid.
        let (nx, ny) = (
            u32::try_from(i64::from(x) + hop.offset.0),
            u32::try_from(i64::from(y) + hop.offset.1),
        );
        debug_assert!(
            nx.is_ok() && ny.is_ok(),
            "hop from ({x}, {y}) {corner:?} left the grid",
        );
        let (Ok(nx), Ok(ny)) = (nx, ny) else {
            break;
        };
        (x, y, corner) = (nx, ny, hop.corner);
    }

    Subpath::new(points)
}
