//! Slicing: per-colour optimisation, tracing and render ordering.
//!
//! A slicer walks the palette of a grid in selector order. For each colour it
//! builds an optimised one-bit image (treating already-traced colours as
//! transparent and not-yet-traced colours as fair game for overpainting),
//! wraps it in a layout, and yields a per-colour [`Process`] bound to a
//! scribe. Render order equals selection order; the processes themselves may
//! complete in any order, including in parallel, before the scribes are
//! consumed downstream.
//!
//! [`Process`]: core_trace::Process

use core_optimize::OptimizeError;

mod palette;
mod selector;
mod slicer;
mod tournament;

pub use palette::collect_palette;
pub use selector::{ColorSelector, PerimeterSelector};
pub use slicer::{ColorTrace, Slicer};
pub use tournament::{ColorReplay, MultiSlicer, Tournament};

/// Slicing error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SliceError {
    #[error(transparent)]
    Optimize(#[from] OptimizeError),
    /// A tournament needs at least one strategy to race.
    #[error("tournament roster is empty")]
    EmptyRoster,
}
