//! Palette indexing: RGBA pixel buffers to colour-index grids.
//!
//! The engine core treats colour indices opaquely; this crate supplies the
//! indexing contract sitting between a decoded image and the slicer. Alpha
//! must be binary (0 fully transparent, 255 fully opaque), index 0 is
//! reserved for transparency, opaque colours are indexed in first-seen
//! order, and the palette is capped well below the point where per-colour
//! tracing stops making sense.
//!
//! File-format decoding stays outside: callers hand in raw RGBA8 rows from
//! whatever decoder they use.

use core_grid::DenseGrid;
use tracing::debug;

/// Palettes must keep fewer than this many entries, transparency included.
pub const MAX_COLORS: usize = 20;

/// Palette indexing error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    /// Alpha values other than 0 and 255 are not representable.
    #[error("unsupported alpha {alpha} at pixel ({x}, {y})")]
    UnsupportedAlpha { x: u32, y: u32, alpha: u8 },
    /// Too many distinct opaque colours.
    #[error("palette would hold {count} entries, limit is {MAX_COLORS}")]
    TooManyColors { count: usize },
    /// Buffer length does not match `4 * width * height`.
    #[error("pixel buffer holds {got} bytes, expected {expected}")]
    BufferSize { expected: usize, got: usize },
}

/// An indexed image: the colour grid plus the RGB value behind each index.
/// Entry 0 is the reserved transparent slot (stored as black).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub palette: Vec<[u8; 3]>,
    pub grid: DenseGrid,
}

/// Index a row-major RGBA8 buffer.
pub fn index_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<IndexedImage, PaletteError> {
    let expected = 4 * width as usize * height as usize;
    if rgba.len() != expected {
        return Err(PaletteError::BufferSize {
            expected,
            got: rgba.len(),
        });
    }
    let mut palette: Vec<[u8; 3]> = vec![[0, 0, 0]];
    let mut cells = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let at = 4 * (y as usize * width as usize + x as usize);
            let [r, g, b, a] = rgba[at..at + 4].try_into().expect("sliced four bytes");
            match a {
                0 => cells.push(0),
                255 => {
                    let rgb = [r, g, b];
                    let index = match palette[1..].iter().position(|&p| p == rgb) {
                        Some(i) => i + 1,
                        None => {
                            if palette.len() + 1 >= MAX_COLORS {
                                return Err(PaletteError::TooManyColors {
                                    count: palette.len() + 1,
                                });
                            }
                            palette.push(rgb);
                            palette.len() - 1
                        }
                    };
                    cells.push(index as u32);
                }
                alpha => return Err(PaletteError::UnsupportedAlpha { x, y, alpha }),
            }
        }
    }
    debug!(
        target: "palette.index",
        width,
        height,
        colors = palette.len() - 1,
        "image indexed"
    );
    let grid =
        DenseGrid::new(width, height, cells).expect("one cell pushed per validated pixel");
    Ok(IndexedImage { palette, grid })
}
