//! One-bit-per-cell working image.
//!
//! Optimisers evolve a solidity mask of the same shape as their source grid;
//! wrapping it as a [`Grid`] (colours 0/1) lets a layout be built straight
//! from the terminal mask without copying.

use fixedbitset::FixedBitSet;

use crate::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    width: u32,
    height: u32,
    bits: FixedBitSet,
}

impl BitGrid {
    /// All-clear mask of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: FixedBitSet::with_capacity(width as usize * height as usize),
        }
    }

    /// Build from a predicate over cell coordinates, row-major.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut g = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    g.set(x as i32, y as i32);
                }
            }
        }
        g
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// True when the cell is set; false for any out-of-bounds coordinate.
    pub fn solid(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.bits.contains(i))
    }

    /// Set a cell. Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.bits.insert(i);
        }
    }

    /// Clear a cell. Out-of-bounds coordinates are ignored.
    pub fn clear(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.bits.set(i, false);
        }
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }
}

impl Grid for BitGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color(&self, x: i32, y: i32) -> u32 {
        u32::from(self.solid(x, y))
    }
}
