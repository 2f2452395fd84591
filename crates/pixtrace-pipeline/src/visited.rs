//! Per-cell corner visitation masks.
//!
//! One `u8` per cell in a flat row-major buffer, low four bits used.
//! Bits are only ever set, never cleared, which bounds a full scan to
//! `4 * width * height` tracer steps.

use crate::corner::Corner;

/// Tracks which (cell, corner) pairs the tracer has already walked.
#[derive(Debug, Clone)]
pub struct CornerTracker {
    width: u32,
    masks: Vec<u8>,
    steps: usize,
}

impl CornerTracker {
    /// Create a tracker with every corner of a `width x height` grid unset.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            masks: vec![0; cells],
            steps: 0,
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns `true` if `corner` of cell `(x, y)` has been visited.
    #[must_use]
    pub fn visited(&self, x: u32, y: u32, corner: Corner) -> bool {
        self.masks[self.index(x, y)] & corner.bit() != 0
    }

    /// Mark `corner` of cell `(x, y)` as visited. Idempotent on the mask,
    /// but every call counts as one step.
    pub fn visit(&mut self, x: u32, y: u32, corner: Corner) {
        let i = self.index(x, y);
        self.masks[i] |= corner.bit();
        self.steps += 1;
    }

    /// Number of [`visit`](Self::visit) calls so far.
    ///
    /// Equals [`visited_count`](Self::visited_count) as long as no pair
    /// was marked twice.
    #[must_use]
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Number of (cell, corner) pairs marked so far.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.masks.iter().map(|m| m.count_ones() as usize).sum()
    }
}
