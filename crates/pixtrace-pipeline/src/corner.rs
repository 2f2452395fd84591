//! Pixel corners and the fixed per-corner transition table driving the
//! boundary tracer.
//!
//! Corners rotate clockwise in image coordinates (y grows downward):
//! top-left, top-right, bottom-right, bottom-left, back to top-left.
//! Rotating from one corner to the next walks one edge of the cell, so
//! a cell whose four neighbours all differ is traced as a clockwise unit
//! square.

/// One of the four corners of a pixel's unit square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    /// The corner at the cell origin.
    TopLeft,
    /// The corner one unit right of the origin.
    TopRight,
    /// The corner diagonally opposite the origin.
    BottomRight,
    /// The corner one unit below the origin.
    BottomLeft,
}

/// A neighbouring cell relative to the current one, paired with the
/// corner of that cell lying on the same geometric point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// Cell offset `(dx, dy)` from the current cell.
    pub offset: (i64, i64),
    /// Corner of the neighbour that coincides with the current corner.
    pub corner: Corner,
}

/// Fixed tracing data for one corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Corner reached by walking the edge that starts at this corner.
    pub next: Corner,
    /// Offset from the cell origin to this corner's lattice point.
    pub vertex: (u32, u32),
    /// Neighbour across the edge from this corner to [`next`](Self::next).
    pub edge: Probe,
    /// Neighbour diagonally across this corner.
    pub diagonal: Probe,
    /// Neighbour across the edge arriving at this corner.
    pub trailing: Probe,
}

const fn probe(dx: i64, dy: i64, corner: Corner) -> Probe {
    Probe {
        offset: (dx, dy),
        corner,
    }
}

const TOP_LEFT: Transition = Transition {
    next: Corner::TopRight,
    vertex: (0, 0),
    edge: probe(0, -1, Corner::BottomLeft),
    diagonal: probe(-1, -1, Corner::BottomRight),
    trailing: probe(-1, 0, Corner::TopRight),
};

const TOP_RIGHT: Transition = Transition {
    next: Corner::BottomRight,
    vertex: (1, 0),
    edge: probe(1, 0, Corner::TopLeft),
    diagonal: probe(1, -1, Corner::BottomLeft),
    trailing: probe(0, -1, Corner::BottomRight),
};

const BOTTOM_RIGHT: Transition = Transition {
    next: Corner::BottomLeft,
    vertex: (1, 1),
    edge: probe(0, 1, Corner::TopRight),
    diagonal: probe(1, 1, Corner::TopLeft),
    trailing: probe(1, 0, Corner::BottomLeft),
};

const BOTTOM_LEFT: Transition = Transition {
    next: Corner::TopLeft,
    vertex: (0, 1),
    edge: probe(-1, 0, Corner::BottomRight),
    diagonal: probe(-1, 1, Corner::TopRight),
    trailing: probe(0, 1, Corner::TopLeft),
};

impl Corner {
    /// All corners in scan order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Bit for this corner in a cell's visitation mask.
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::TopLeft => 1 << 0,
            Self::TopRight => 1 << 1,
            Self::BottomRight => 1 << 2,
            Self::BottomLeft => 1 << 3,
        }
    }

    /// The constant transition record for this corner.
    #[must_use]
    pub const fn transition(self) -> &'static Transition {
        match self {
            Self::TopLeft => &TOP_LEFT,
            Self::TopRight => &TOP_RIGHT,
            Self::BottomRight => &BOTTOM_RIGHT,
            Self::BottomLeft => &BOTTOM_LEFT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Absolute lattice point of `corner` on the cell at `(x, y)`.
    fn lattice_point(x: i64, y: i64, corner: Corner) -> (i64, i64) {
        let (dx, dy) = corner.transition().vertex;
        (x + i64::from(dx), y + i64::from(dy))
    }

    #[test]
    fn next_cycles_through_all_corners() {
        let mut corner = Corner::TopLeft;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(corner);
            corner = corner.transition().next;
        }
        assert_eq!(corner, Corner::TopLeft);
        assert_eq!(seen, Corner::ALL);
    }

    #[test]
    fn bits_are_distinct_and_fit_in_a_nibble() {
        let mask = Corner::ALL.iter().fold(0u8, |acc, c| {
            assert_eq!(acc & c.bit(), 0);
            acc | c.bit()
        });
        assert_eq!(mask, 0x0F);
    }

    #[test]
    fn probes_name_the_same_geometric_point() {
        for corner in Corner::ALL {
            let t = corner.transition();
            let here = lattice_point(0, 0, corner);
            for p in [t.edge, t.diagonal, t.trailing] {
                assert_eq!(
                    lattice_point(p.offset.0, p.offset.1, p.corner),
                    here,
                    "{corner:?} probe {p:?} points elsewhere",
                );
            }
        }
    }

    #[test]
    fn edge_probe_shares_the_walked_edge() {
        // The edge from `corner` to `next` must be shared with the edge
        // neighbour: both endpoints are lattice points of that neighbour.
        for corner in Corner::ALL {
            let t = corner.transition();
            let (dx, dy) = t.edge.offset;
            let a = lattice_point(0, 0, corner);
            let b = lattice_point(0, 0, t.next);
            let neighbour: Vec<_> = Corner::ALL
                .iter()
                .map(|&c| lattice_point(dx, dy, c))
                .collect();
            assert!(neighbour.contains(&a) && neighbour.contains(&b));
        }
    }

    #[test]
    fn trailing_probe_is_previous_corners_edge_probe() {
        for corner in Corner::ALL {
            let t = corner.transition();
            let previous = Corner::ALL
                .into_iter()
                .find(|c| c.transition().next == corner)
                .map(|c| c.transition().edge.offset);
            assert_eq!(previous, Some(t.trailing.offset));
        }
    }

    #[test]
    fn diagonal_is_sum_of_edge_and_trailing_offsets() {
        for corner in Corner::ALL {
            let t = corner.transition();
            assert_eq!(
                t.diagonal.offset,
                (
                    t.edge.offset.0 + t.trailing.offset.0,
                    t.edge.offset.1 + t.trailing.offset.1
                ),
            );
        }
    }
}
