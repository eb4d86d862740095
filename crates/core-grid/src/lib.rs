//! Raster foundations: colour grids, views, working bitmaps and colour sets.
//!
//! Everything downstream (layouts, optimisers, slicers) reads cells through
//! the [`Grid`] trait. The trait is deliberately total: `color(x, y)` accepts
//! any `i32` coordinate and answers 0 (transparent) outside the grid bounds,
//! so border neighbourhoods never need special casing.
//!
//! Invariants:
//! * `color(x, y) == 0` whenever `x ∉ [0, width)` or `y ∉ [0, height)`.
//! * Colour 0 is transparent; any non-zero index is an opaque palette member.
//! * A [`SubGrid`] never widens its parent: reads outside the view window are
//!   0 even where the parent would answer a colour.

use std::fmt;

mod bits;
mod color;

pub use bits::BitGrid;
pub use color::ColorSet;

/// Integer lattice point shared by layouts and scribes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid construction error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Cell buffer length does not match `width * height`.
    #[error("cell buffer holds {got} entries, expected {expected}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Read-only view of a rectangle of colour indices.
pub trait Grid {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Colour index at `(x, y)`; 0 outside the bounds.
    fn color(&self, x: i32, y: i32) -> u32;

    /// True when `(x, y)` lies inside `[0, width) × [0, height)`.
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// True when the cell is opaque under the universal reducer (colour != 0).
    fn solid(&self, x: i32, y: i32) -> bool {
        self.color(x, y) != 0
    }
}

impl<G: Grid + ?Sized> Grid for &G {
    fn width(&self) -> u32 {
        (**self).width()
    }
    fn height(&self) -> u32 {
        (**self).height()
    }
    fn color(&self, x: i32, y: i32) -> u32 {
        (**self).color(x, y)
    }
}

/// Owned row-major colour grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseGrid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl DenseGrid {
    /// Wrap a row-major cell buffer. The buffer length must equal
    /// `width * height`.
    pub fn new(width: u32, height: u32, cells: Vec<u32>) -> Result<Self, GridError> {
        let expected = width as usize * height as usize;
        if cells.len() != expected {
            return Err(GridError::DimensionMismatch {
                expected,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// All-transparent grid of the given dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Build from a closure, row-major. Convenient for tests and synthetic
    /// inputs.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u32) -> Self {
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }
}

impl Grid for DenseGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color(&self, x: i32, y: i32) -> u32 {
        if !self.in_bounds(x, y) {
            return 0;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

/// Borrowed sub-rectangle of another grid.
///
/// The view has its own origin; reads outside the view window default to 0
/// even when the parent holds a colour there, and reads the view forwards to
/// the parent inherit the parent's own out-of-bounds rule.
#[derive(Debug, Clone, Copy)]
pub struct SubGrid<'a, G: Grid> {
    parent: &'a G,
    origin_x: i32,
    origin_y: i32,
    width: u32,
    height: u32,
}

impl<'a, G: Grid> SubGrid<'a, G> {
    pub fn new(parent: &'a G, origin_x: i32, origin_y: i32, width: u32, height: u32) -> Self {
        Self {
            parent,
            origin_x,
            origin_y,
            width,
            height,
        }
    }
}

impl<G: Grid> Grid for SubGrid<'_, G> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color(&self, x: i32, y: i32) -> u32 {
        if !self.in_bounds(x, y) {
            return 0;
        }
        self.parent.color(self.origin_x + x, self.origin_y + y)
    }
}
