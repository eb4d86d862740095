//! Counting sink: discards geometry, keeps totals.

use core_grid::Point;

use crate::{Score, Scribe};

/// Scribe that only counts the commands it receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountScribe {
    pub moves: u32,
    pub draws: u32,
    pub closes: u32,
}

impl CountScribe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> Score {
        Score::new(self.moves, self.draws)
    }
}

impl Scribe for CountScribe {
    fn move_to(&mut self, _p: Point) {
        self.moves += 1;
    }

    fn draw_to(&mut self, _p: Point) {
        self.draws += 1;
    }

    fn close(&mut self) {
        self.closes += 1;
    }
}
