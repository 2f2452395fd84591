//! Path optimization: drop collinear vertices from traced subpaths.
//!
//! The tracer emits a vertex at every pixel corner it walks past, so a
//! straight run of `n` pixels produces `n + 1` vertices. Only the vertices
//! where the boundary turns are needed to describe the polygon.
//!
//! Collinearity is tested on axes only: a vertex is redundant when it and
//! both cyclic neighbours share an `x` or share a `y`. Traced subpaths
//! only ever step horizontally or vertically, so this is exact.

use crate::types::{ColorPath, Point, Subpath};

/// Returns `true` when `p` lies on the axis-aligned line through
/// `prev` and `next`.
const fn is_axis_collinear(prev: Point, p: Point, next: Point) -> bool {
    (prev.x == p.x && p.x == next.x) || (prev.y == p.y && p.y == next.y)
}

/// Remove collinear vertices from one closed subpath.
///
/// The subpath is treated cyclically, so the first and last points are
/// tested against each other too. Removal flags are computed against the
/// input, then applied in one pass, preserving order. If fewer than three
/// points would remain the input is degenerate (it encloses no area) and
/// is returned unchanged, as are subpaths with fewer than three points.
#[must_use = "returns the optimized subpath"]
pub fn optimize_subpath(subpath: &Subpath) -> Subpath {
    let points = subpath.points();
    let n = points.len();
    if n < 3 {
        return subpath.clone();
    }

    let kept: Vec<Point> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            !is_axis_collinear(prev, points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if kept.len() < 3 {
        return subpath.clone();
    }
    Subpath::new(kept)
}

/// Optimize every subpath of every color path.
#[must_use = "returns the optimized paths"]
pub fn optimize_paths(paths: &[ColorPath]) -> Vec<ColorPath> {
    paths
        .iter()
        .map(|path| ColorPath {
            color: path.color,
            subpaths: path.subpaths.iter().map(optimize_subpath).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn sp(coords: &[(u32, u32)]) -> Subpath {
        Subpath::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn short_subpaths_pass_through() {
        assert!(optimize_subpath(&sp(&[])).is_empty());
        assert_eq!(optimize_subpath(&sp(&[(0, 0)])), sp(&[(0, 0)]));
        assert_eq!(
            optimize_subpath(&sp(&[(0, 0), (1, 0)])),
            sp(&[(0, 0), (1, 0)])
        );
    }

    #[test]
    fn unit_square_is_already_minimal() {
        let square = sp(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        assert_eq!(optimize_subpath(&square), square);
    }

    #[test]
    fn two_by_one_rectangle_collapses_to_four_corners() {
        let traced = sp(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]);
        assert_eq!(
            optimize_subpath(&traced),
            sp(&[(0, 0), (2, 0), (2, 1), (0, 1)])
        );
    }

    #[test]
    fn collinear_start_point_is_removed_too() {
        // Starts mid-way along the top edge.
        let traced = sp(&[(1, 0), (2, 0), (2, 1), (0, 1), (0, 0)]);
        assert_eq!(
            optimize_subpath(&traced),
            sp(&[(2, 0), (2, 1), (0, 1), (0, 0)])
        );
    }

    #[test]
    fn long_runs_collapse() {
        let traced = sp(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (3, 1),
            (3, 2),
            (2, 2),
            (1, 2),
            (0, 2),
            (0, 1),
        ]);
        assert_eq!(
            optimize_subpath(&traced),
            sp(&[(0, 0), (3, 0), (3, 2), (0, 2)])
        );
    }

    #[test]
    fn l_shape_keeps_all_six_turns() {
        let traced = sp(&[
            (1, 1),
            (0, 1),
            (0, 0),
            (1, 0),
            (2, 0),
            (2, 1),
            (2, 2),
            (1, 2),
        ]);
        let optimized = optimize_subpath(&traced);
        assert_eq!(
            optimized,
            sp(&[(1, 1), (0, 1), (0, 0), (2, 0), (2, 2), (1, 2)])
        );
        assert_eq!(
            optimized.signed_area_doubled(),
            traced.signed_area_doubled()
        );
    }

    #[test]
    fn degenerate_line_is_left_alone() {
        let line = sp(&[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(optimize_subpath(&line), line);
    }

    #[test]
    fn optimization_is_idempotent() {
        let traced = sp(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]);
        let once = optimize_subpath(&traced);
        assert_eq!(optimize_subpath(&once), once);
    }

    #[test]
    fn optimize_paths_keeps_colors_and_subpath_count() {
        let color = Color::new(1, 2, 3, 255);
        let paths = vec![ColorPath {
            color,
            subpaths: vec![
                sp(&[(0, 0), (1, 0), (2, 0), (2, 1), (1, 1), (0, 1)]),
                sp(&[(5, 5), (6, 5), (6, 6), (5, 6)]),
            ],
        }];
        let optimized = optimize_paths(&paths);
        assert_eq!(optimized.len(), 1);
        assert_eq!(optimized[0].color, color);
        assert_eq!(optimized[0].subpaths.len(), 2);
        assert_eq!(optimized[0].point_count(), 8);
    }
}
