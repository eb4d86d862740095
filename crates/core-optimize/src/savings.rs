//! Precomputed 3×3 saving table.
//!
//! For every 9-bit neighbourhood pattern the table stores the (moves, draws)
//! change obtained by flipping the centre cell, derived by tracing the 3×3
//! one-bit grid with and without the centre and differencing the counting
//! scribe scores. A positive component means the flip shrinks the output.
//!
//! The table is process-wide read-only state behind a `LazyLock`; call
//! [`init`] before spawning workers to publish it eagerly, or let first use
//! do it.

use std::sync::LazyLock;

use core_grid::{BitGrid, Grid};
use core_layout::RectLayout;
use core_scribe::{CountScribe, Saving, Score};
use core_trace::{Tracer, drive};

/// 3×3 neighbourhood pattern. Bit i is cell i in row-major order from the
/// top-left; bit 4 is the centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(u16);

impl Pattern {
    pub const CENTER: u16 = 1 << 4;
    pub const COUNT: usize = 512;

    pub fn new(bits: u16) -> Self {
        debug_assert!(bits < 512, "pattern bits out of range");
        Self(bits & 0x1ff)
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn has_center(self) -> bool {
        self.0 & Self::CENTER != 0
    }

    pub fn flip_center(self) -> Self {
        Self(self.0 ^ Self::CENTER)
    }

    /// Neighbourhood of `(x, y)` in a working image; out-of-bounds cells
    /// contribute clear bits.
    pub fn from_image(image: &BitGrid, x: i32, y: i32) -> Self {
        let mut bits = 0u16;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if image.solid(x + dx, y + dy) {
                    bits |= 1 << ((dy + 1) * 3 + (dx + 1));
                }
            }
        }
        Self(bits)
    }
}

/// A pattern is itself a 3×3 one-bit grid, which is exactly what the table
/// builder traces.
impl Grid for Pattern {
    fn width(&self) -> u32 {
        3
    }

    fn height(&self) -> u32 {
        3
    }

    fn color(&self, x: i32, y: i32) -> u32 {
        if !self.in_bounds(x, y) {
            return 0;
        }
        u32::from(self.0 >> (y * 3 + x) & 1)
    }
}

pub struct SavingTable {
    entries: Vec<Saving>,
}

impl SavingTable {
    fn build() -> Self {
        let scores: Vec<Score> = (0..Pattern::COUNT as u16)
            .map(|bits| {
                let pattern = Pattern::new(bits);
                let mut tracer = Tracer::new(RectLayout::from_grid(&pattern), CountScribe::new());
                drive(&mut tracer);
                tracer.scribe().score()
            })
            .collect();
        let entries = (0..Pattern::COUNT)
            .map(|p| scores[p].delta(scores[p ^ Pattern::CENTER as usize]))
            .collect();
        Self { entries }
    }

    /// Score change of flipping the centre of `p`.
    pub fn saving(&self, p: Pattern) -> Saving {
        self.entries[p.bits() as usize]
    }
}

static TABLE: LazyLock<SavingTable> = LazyLock::new(SavingTable::build);

/// The process-wide saving table.
pub fn savings() -> &'static SavingTable {
    &TABLE
}

/// Force table construction now, before any worker threads need it.
pub fn init() {
    LazyLock::force(&TABLE);
}
