//! Colour selection order.
//!
//! The perimeter rule prefers colours with the most exposure to transparent
//! space, so the shapes most entangled with the background get traced first
//! and later colours can overpaint them with simpler outlines.

use core_grid::{ColorSet, Grid};

/// Picks the next colour to trace from a candidate set.
pub trait ColorSelector {
    /// `None` terminates the slice; so does `Some(0)`.
    fn select<G: Grid>(&self, grid: &G, candidates: &ColorSet) -> Option<u32>;
}

/// Weighted count of candidate cells adjacent to transparent space.
///
/// Every lattice point examines its four straddling cells. A candidate cell
/// at bottom-right scores `diagonal` against a transparent top-left and
/// `orthogonal` against a transparent top-right or bottom-left, with the
/// symmetric contributions when the candidate sits in the neighbour position
/// instead. Ties resolve to the lowest colour index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterSelector {
    pub diagonal: f64,
    pub orthogonal: f64,
}

impl Default for PerimeterSelector {
    fn default() -> Self {
        Self {
            diagonal: 0.7,
            orthogonal: 1.0,
        }
    }
}

impl PerimeterSelector {
    pub fn new(diagonal: f64, orthogonal: f64) -> Self {
        Self {
            diagonal,
            orthogonal,
        }
    }

    /// Accumulated perimeter score per candidate colour, indexed by colour.
    fn weigh<G: Grid>(&self, grid: &G, candidates: &ColorSet) -> Vec<f64> {
        let Some(max) = candidates.max() else {
            return Vec::new();
        };
        let mut scores = vec![0.0; max as usize + 1];
        let mut add = |color: u32, weight: f64| {
            if candidates.contains(color) {
                scores[color as usize] += weight;
            }
        };
        for y in 0..=grid.height() as i32 {
            for x in 0..=grid.width() as i32 {
                let tl = grid.color(x - 1, y - 1);
                let tr = grid.color(x, y - 1);
                let bl = grid.color(x - 1, y);
                let br = grid.color(x, y);
                // Both diagonal pairs meet only at this point; the orthogonal
                // pairs are scored at the shared edge's first endpoint.
                if tl == 0 {
                    add(br, self.diagonal);
                }
                if br == 0 {
                    add(tl, self.diagonal);
                }
                if tr == 0 {
                    add(bl, self.diagonal);
                }
                if bl == 0 {
                    add(tr, self.diagonal);
                }
                if tr == 0 {
                    add(br, self.orthogonal);
                }
                if br == 0 {
                    add(tr, self.orthogonal);
                }
                if bl == 0 {
                    add(br, self.orthogonal);
                }
                if br == 0 {
                    add(bl, self.orthogonal);
                }
            }
        }
        scores
    }
}

impl ColorSelector for PerimeterSelector {
    fn select<G: Grid>(&self, grid: &G, candidates: &ColorSet) -> Option<u32> {
        let scores = self.weigh(grid, candidates);
        let mut best: Option<(u32, f64)> = None;
        for c in candidates.iter() {
            let score = scores[c as usize];
            // Strictly-greater keeps the lowest index on ties.
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((c, score));
            }
        }
        best.map(|(c, _)| c)
    }
}
