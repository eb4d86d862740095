//! Rectangular step graph over a colour grid.
//!
//! Identifier scheme for a W×H grid (top-left origin, +x right, +y down):
//! * Horizontal steps occupy `[0, 2·W·(H+1))`. Undirected index
//!   `h = W·y + x` spans (x,y)→(x+1,y); identifier `2h` is the forward (+x)
//!   direction, `2h+1` the reverse.
//! * Vertical steps follow, occupying `2·W·(H+1) + [0, 2·H·(W+1))`.
//!   Undirected index `v = (W+1)·y + x` spans (x,y)→(x,y+1); even offsets are
//!   forward (+y).
//! * The inverse of any identifier is the identifier XOR 1.
//!
//! Availability is one bit per undirected edge, seeded where the two cells
//! straddling the edge differ in solidity (colour 0 against non-0), which is
//! exactly the outline of the solid region.

use core_grid::{Grid, Point};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

use crate::{Layout, LayoutError, Step, Successors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone)]
pub struct RectLayout {
    width: u32,
    height: u32,
    /// Undirected horizontal edge count, `W·(H+1)`.
    hcap: u32,
    /// Undirected vertical edge count, `H·(W+1)`.
    vcap: u32,
    /// One availability bit per undirected edge, horizontals first.
    edges: FixedBitSet,
}

impl RectLayout {
    /// Build the outline step graph of a grid. Cells with colour 0 are void;
    /// everything else is solid.
    pub fn from_grid<G: Grid>(grid: &G) -> Self {
        let width = grid.width();
        let height = grid.height();
        let hcap = width * (height + 1);
        let vcap = height * (width + 1);
        let mut edges = FixedBitSet::with_capacity((hcap + vcap) as usize);
        // Horizontal edge (x,y)..(x+1,y) separates the cells above and below.
        for y in 0..=height as i32 {
            for x in 0..width as i32 {
                if grid.solid(x, y - 1) != grid.solid(x, y) {
                    edges.insert((width as i32 * y + x) as usize);
                }
            }
        }
        // Vertical edge (x,y)..(x,y+1) separates the cells left and right.
        for y in 0..height as i32 {
            for x in 0..=width as i32 {
                if grid.solid(x - 1, y) != grid.solid(x, y) {
                    edges.insert((hcap as i32 + (width as i32 + 1) * y + x) as usize);
                }
            }
        }
        Self {
            width,
            height,
            hcap,
            vcap,
            edges,
        }
    }

    /// Validate a raw identifier into a [`Step`].
    pub fn step(&self, id: u32) -> Result<Step, LayoutError> {
        let count = self.step_count();
        if id < count {
            Ok(Step(id))
        } else {
            Err(LayoutError::StepOutOfRange { id, count })
        }
    }

    fn axis(&self, s: Step) -> Axis {
        if s.0 < 2 * self.hcap {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Undirected availability-bit index of a step.
    fn undirected(&self, s: Step) -> usize {
        match self.axis(s) {
            Axis::Horizontal => (s.0 / 2) as usize,
            Axis::Vertical => (self.hcap + (s.0 - 2 * self.hcap) / 2) as usize,
        }
    }

    fn reversed(&self, s: Step) -> bool {
        s.0 & 1 == 1
    }

    /// Directed identifier of the reverse step over undirected bit `u`.
    fn reverse_of_undirected(&self, u: usize) -> Step {
        let u = u as u32;
        if u < self.hcap {
            Step(2 * u + 1)
        } else {
            Step(2 * self.hcap + 2 * (u - self.hcap) + 1)
        }
    }

    /// Directed step leaving vertex `p` towards +x, if that edge exists.
    fn east_of(&self, p: Point) -> Option<Step> {
        (p.x < self.width as i32).then(|| Step(2 * (self.width as i32 * p.y + p.x) as u32))
    }

    fn west_of(&self, p: Point) -> Option<Step> {
        (p.x > 0).then(|| Step(2 * (self.width as i32 * p.y + p.x - 1) as u32 + 1))
    }

    fn south_of(&self, p: Point) -> Option<Step> {
        (p.y < self.height as i32)
            .then(|| Step(2 * self.hcap + 2 * ((self.width as i32 + 1) * p.y + p.x) as u32))
    }

    fn north_of(&self, p: Point) -> Option<Step> {
        (p.y > 0).then(|| {
            Step(2 * self.hcap + 2 * ((self.width as i32 + 1) * (p.y - 1) + p.x) as u32 + 1)
        })
    }
}

impl Layout for RectLayout {
    fn step_count(&self) -> u32 {
        2 * (self.hcap + self.vcap)
    }

    fn any_step(&self) -> Option<Step> {
        // Lowest set bit is the topmost-then-leftmost boundary edge; its
        // reverse direction ends on a corner of the outline, so the trace
        // opens with a move at a corner.
        self.edges.ones().next().map(|u| self.reverse_of_undirected(u))
    }

    fn options(&self, s: Step) -> Successors {
        let p = self.end(s);
        let inverse = self.invert(s);
        let mut out: Successors = SmallVec::new();
        for candidate in [
            self.east_of(p),
            self.south_of(p),
            self.west_of(p),
            self.north_of(p),
        ]
        .into_iter()
        .flatten()
        {
            if candidate != inverse && self.available(candidate) {
                out.push(candidate);
            }
        }
        out
    }

    fn start(&self, s: Step) -> Point {
        self.end(self.invert(s))
    }

    fn end(&self, s: Step) -> Point {
        debug_assert!(s.0 < self.step_count(), "foreign step {s:?}");
        match self.axis(s) {
            Axis::Horizontal => {
                let h = s.0 / 2;
                let x = (h % self.width) as i32;
                let y = (h / self.width) as i32;
                if self.reversed(s) {
                    Point::new(x, y)
                } else {
                    Point::new(x + 1, y)
                }
            }
            Axis::Vertical => {
                let v = (s.0 - 2 * self.hcap) / 2;
                let x = (v % (self.width + 1)) as i32;
                let y = (v / (self.width + 1)) as i32;
                if self.reversed(s) {
                    Point::new(x, y)
                } else {
                    Point::new(x, y + 1)
                }
            }
        }
    }

    fn invert(&self, s: Step) -> Step {
        Step(s.0 ^ 1)
    }

    fn parallel(&self, a: Step, b: Step) -> bool {
        self.axis(a) == self.axis(b) && self.reversed(a) == self.reversed(b)
    }

    fn antiparallel(&self, a: Step, b: Step) -> bool {
        self.axis(a) == self.axis(b) && self.reversed(a) != self.reversed(b)
    }

    fn available(&self, s: Step) -> bool {
        self.edges.contains(self.undirected(s))
    }

    fn consume(&mut self, s: Step) {
        let u = self.undirected(s);
        debug_assert!(self.edges.contains(u), "step {s:?} consumed twice");
        self.edges.set(u, false);
    }

    fn remaining(&self) -> usize {
        self.edges.count_ones(..)
    }
}
