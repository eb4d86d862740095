use core_grid::{DenseGrid, Grid};
use core_layout::RectLayout;
use core_scribe::PathScribe;
use core_trace::{Tracer, drive};

/// Trace the outline of every non-zero cell of `grid` into a path collector.
pub fn trace_paths<G: Grid>(grid: &G) -> PathScribe {
    let mut tracer = Tracer::new(RectLayout::from_grid(grid), PathScribe::new());
    drive(&mut tracer);
    tracer.into_scribe()
}

/// Decode a picture where `#` is solid and anything else is void.
pub fn picture(rows: &[&str]) -> DenseGrid {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    DenseGrid::from_fn(width, height, |x, y| {
        u32::from(rows[y as usize].as_bytes()[x as usize] == b'#')
    })
}
