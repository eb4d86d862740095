//! Single-strategy slicer.

use core_grid::Grid;
use core_layout::RectLayout;
use core_optimize::Strategy;
use core_scribe::Scribe;
use core_trace::{Process, Tracer};
use tracing::{debug, warn};

use crate::{ColorSelector, SliceError, collect_palette};

/// A traced colour: the per-colour process together with the scribe that
/// receives its outline.
pub struct ColorTrace<S: Scribe> {
    color: u32,
    tracer: Tracer<RectLayout, S>,
}

impl<S: Scribe> ColorTrace<S> {
    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn scribe(&self) -> &S {
        self.tracer.scribe()
    }

    /// Steps not yet consumed; zero once the process has completed.
    pub fn remaining_steps(&self) -> usize {
        use core_layout::Layout;
        self.tracer.layout().remaining()
    }

    pub fn into_scribe(self) -> (u32, S) {
        (self.color, self.tracer.into_scribe())
    }
}

impl<S: Scribe> Process for ColorTrace<S> {
    fn process(&mut self) -> bool {
        self.tracer.process()
    }
}

/// Drives one optimiser strategy across the palette of a grid.
///
/// `slice` returns the per-colour processes in render order (selection
/// order). The caller runs them, serially or with
/// [`drive_all`](core_trace::drive_all), and then reads the scribes back in
/// list order.
pub struct Slicer<Sel: ColorSelector> {
    pub selector: Sel,
    pub strategy: Strategy,
}

impl<Sel: ColorSelector> Slicer<Sel> {
    pub fn new(selector: Sel, strategy: Strategy) -> Self {
        Self { selector, strategy }
    }

    pub fn slice<G, S, F>(&self, grid: &G, mut scribes: F) -> Result<Vec<ColorTrace<S>>, SliceError>
    where
        G: Grid,
        S: Scribe,
        F: FnMut(u32) -> S,
    {
        let mut palette = collect_palette(grid);
        let mut out = Vec::with_capacity(palette.len());
        while let Some(color) = self.selector.select(grid, &palette) {
            if color == 0 {
                break;
            }
            if !palette.remove(color) {
                warn!(target: "slice.select", color, "selector returned a colour outside the palette");
                break;
            }
            // Whatever remains unselected is the future set for this colour.
            let mut job = self.strategy.prepare(grid, color, &palette)?;
            while job.step() {}
            let image = job.into_image();
            let layout = RectLayout::from_grid(&image);
            debug!(
                target: "slice.plan",
                color,
                strategy = self.strategy.name(),
                solid = image.count(),
                "colour planned"
            );
            out.push(ColorTrace {
                color,
                tracer: Tracer::new(layout, scribes(color)),
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PerimeterSelector;
    use core_grid::DenseGrid;
    use core_scribe::{CountScribe, Score};
    use core_trace::{drive, drive_all};

    fn slicer() -> Slicer<PerimeterSelector> {
        Slicer::new(PerimeterSelector::default(), Strategy::Minimal)
    }

    #[test]
    fn empty_grid_slices_to_nothing() {
        let traces = slicer()
            .slice(&DenseGrid::empty(5, 5), |_| CountScribe::new())
            .unwrap();
        assert!(traces.is_empty());
    }

    #[test]
    fn render_order_follows_the_selector() {
        let g = DenseGrid::from_fn(2, 2, |x, y| 1 + (x + y) % 2);
        let traces = slicer().slice(&g, |_| CountScribe::new()).unwrap();
        let order: Vec<_> = traces.iter().map(ColorTrace::color).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn processes_fill_their_scribes() {
        let g = DenseGrid::new(1, 1, vec![3]).unwrap();
        let mut traces = slicer().slice(&g, |_| CountScribe::new()).unwrap();
        assert_eq!(traces.len(), 1);
        drive(&mut traces[0]);
        assert_eq!(traces[0].remaining_steps(), 0);
        let (color, scribe) = traces.pop().unwrap().into_scribe();
        assert_eq!(color, 3);
        assert_eq!(scribe.score(), Score::new(1, 4));
        assert_eq!(scribe.closes, 1);
    }

    #[test]
    fn bulk_parallel_drive_completes_every_colour() {
        let g = DenseGrid::from_fn(6, 6, |x, y| 1 + (x / 2 + y / 2) % 3);
        let mut traces = slicer().slice(&g, |_| CountScribe::new()).unwrap();
        assert_eq!(traces.len(), 3);
        drive_all(&mut traces);
        for t in &traces {
            assert_eq!(t.remaining_steps(), 0);
            assert!(t.scribe().moves > 0);
        }
    }
}
