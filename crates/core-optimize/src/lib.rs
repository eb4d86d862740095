//! Per-colour cell-map optimisers.
//!
//! Before a colour is traced, its cell map may be rewritten to shrink the
//! output: cells of *future* colours (not yet traced) can be painted over
//! now and overpainted later, so including them is free wherever it
//! straightens the outline. A [`Strategy`] value names the rewriting policy
//! and carries its scorers; [`Strategy::prepare`] validates the arguments
//! and returns a cooperative [`Job`] whose terminal image is the one-bit
//! grid handed to the layout.
//!
//! Output contract: a cell is solid in the terminal image only if its source
//! colour equals the current colour, or the optimiser chose it and its
//! source colour lies in the future set. Cells of past colours (including
//! transparent) are never solid.

use std::collections::VecDeque;

use core_grid::{BitGrid, ColorSet, Grid};
use core_scribe::Scorer;
use core_trace::Process;
use fixedbitset::FixedBitSet;

mod savings;
mod template;

pub use savings::{Pattern, SavingTable, init, savings};

/// Optimiser argument error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    /// The current colour must be opaque; 0 is the transparent index.
    #[error("cannot optimise the transparent colour")]
    TransparentCurrent,
    /// The current colour may not simultaneously be a future colour.
    #[error("current colour {0} is also in the future set")]
    CurrentInFuture(u32),
}

/// A cell-map rewriting policy.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// The current colour's cells only; no rewriting.
    Minimal,
    /// Every current and future cell, solid.
    Mapped,
    /// Start minimal, add future cells whose 3×3 saving passes the scorer.
    Accreting { scorer: Scorer, eager: bool },
    /// Start mapped, remove future cells whose 3×3 saving passes the scorer.
    Eroding { scorer: Scorer, eager: bool },
    /// Accretion with corner/projection template fills, then a reluctant
    /// erosion pass (strictly positive savings only).
    Clever {
        accretion: Scorer,
        erosion: Scorer,
        eager: bool,
    },
}

impl Strategy {
    /// Short name for logs and score tables.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Minimal => "minimal",
            Strategy::Mapped => "mapped",
            Strategy::Accreting { .. } => "accrete",
            Strategy::Eroding { .. } => "erode",
            Strategy::Clever { .. } => "clever",
        }
    }

    /// Validate the colour arguments and build the optimisation job.
    pub fn prepare<'g, G: Grid>(
        &self,
        src: &'g G,
        current: u32,
        future: &ColorSet,
    ) -> Result<Job<'g, G>, OptimizeError> {
        if current == 0 {
            return Err(OptimizeError::TransparentCurrent);
        }
        if future.contains(current) {
            return Err(OptimizeError::CurrentInFuture(current));
        }
        let width = src.width();
        let height = src.height();
        let minimal = || BitGrid::from_fn(width, height, |x, y| src.color(x as i32, y as i32) == current);
        let mapped = || {
            BitGrid::from_fn(width, height, |x, y| {
                let c = src.color(x as i32, y as i32);
                c == current || future.contains(c)
            })
        };
        let (image, phase) = match *self {
            Strategy::Minimal => (minimal(), Phase::Done),
            Strategy::Mapped => (mapped(), Phase::Done),
            Strategy::Accreting { scorer, eager } => (
                minimal(),
                Phase::Accrete {
                    scorer,
                    eager,
                    templates: false,
                    erosion: None,
                },
            ),
            Strategy::Eroding { scorer, eager } => (mapped(), Phase::Erode { scorer, eager }),
            Strategy::Clever {
                accretion,
                erosion,
                eager,
            } => (
                minimal(),
                Phase::Accrete {
                    scorer: accretion,
                    eager,
                    templates: true,
                    erosion: Some(erosion),
                },
            ),
        };
        let cells = width as usize * height as usize;
        let mut job = Job {
            src,
            current,
            future: future.clone(),
            image,
            queue: VecDeque::new(),
            queued: FixedBitSet::with_capacity(cells),
            phase,
        };
        if !matches!(job.phase, Phase::Done) {
            job.seed_all();
        }
        Ok(job)
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Done,
    Accrete {
        scorer: Scorer,
        eager: bool,
        templates: bool,
        erosion: Option<Scorer>,
    },
    Erode {
        scorer: Scorer,
        eager: bool,
    },
}

/// Cooperative optimisation job. Drive with [`step`](Self::step) (or as a
/// [`Process`]) until it reports no work, then take the terminal image.
#[derive(Debug)]
pub struct Job<'g, G: Grid> {
    src: &'g G,
    current: u32,
    future: ColorSet,
    image: BitGrid,
    queue: VecDeque<u32>,
    queued: FixedBitSet,
    phase: Phase,
}

impl<'g, G: Grid> Job<'g, G> {
    /// Terminal (or in-progress) working image.
    pub fn image(&self) -> &BitGrid {
        &self.image
    }

    pub fn into_image(self) -> BitGrid {
        self.image
    }

    /// Perform one bounded unit of work; true while more remains.
    pub fn step(&mut self) -> bool {
        match self.phase {
            Phase::Done => false,
            Phase::Accrete {
                scorer,
                eager,
                templates,
                erosion,
            } => {
                let Some((x, y)) = self.pop() else {
                    return self.finish_accretion(erosion);
                };
                self.accrete_cell(x, y, scorer, eager, templates);
                true
            }
            Phase::Erode { scorer, eager } => {
                let Some((x, y)) = self.pop() else {
                    self.phase = Phase::Done;
                    return false;
                };
                self.erode_cell(x, y, scorer, eager);
                true
            }
        }
    }

    fn finish_accretion(&mut self, erosion: Option<Scorer>) -> bool {
        match erosion {
            Some(scorer) => {
                tracing::debug!(
                    target: "optimize.clever",
                    color = self.current,
                    solid = self.image.count(),
                    "accretion done, eroding"
                );
                self.phase = Phase::Erode {
                    scorer,
                    eager: false,
                };
                self.seed_solid();
                !self.queue.is_empty()
            }
            None => {
                self.phase = Phase::Done;
                false
            }
        }
    }

    fn reduces(&self, color: u32) -> bool {
        color == self.current || self.future.contains(color)
    }

    fn width(&self) -> i32 {
        self.image.width() as i32
    }

    fn cell_index(&self, x: i32, y: i32) -> usize {
        y as usize * self.image.width() as usize + x as usize
    }

    fn seed_all(&mut self) {
        let cells = self.image.width() as usize * self.image.height() as usize;
        for i in 0..cells {
            self.queue.push_back(i as u32);
            self.queued.insert(i);
        }
    }

    fn seed_solid(&mut self) {
        for y in 0..self.image.height() as i32 {
            for x in 0..self.width() {
                if self.image.solid(x, y) {
                    self.enqueue(x, y);
                }
            }
        }
    }

    fn pop(&mut self) -> Option<(i32, i32)> {
        let i = self.queue.pop_front()?;
        self.queued.set(i as usize, false);
        let w = self.image.width();
        Some(((i % w) as i32, (i / w) as i32))
    }

    fn enqueue(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.image.height() as i32 {
            return;
        }
        let i = self.cell_index(x, y);
        if !self.queued.contains(i) {
            self.queued.insert(i);
            self.queue.push_back(i as u32);
        }
    }

    /// Requeue the neighbours whose evaluation the flip at `(x, y)` may have
    /// changed: non-solid ones during accretion, solid ones during erosion.
    fn requeue_neighbors(&mut self, x: i32, y: i32, want_solid: bool) {
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.image.solid(x + dx, y + dy) == want_solid {
                    self.enqueue(x + dx, y + dy);
                }
            }
        }
    }

    fn passes(gain: i32, eager: bool) -> bool {
        if eager { gain >= 0 } else { gain > 0 }
    }

    fn accrete_cell(&mut self, x: i32, y: i32, scorer: Scorer, eager: bool, templates: bool) {
        if self.image.solid(x, y) {
            return;
        }
        if !self.future.contains(self.src.color(x, y)) {
            return;
        }
        let p = Pattern::from_image(&self.image, x, y);
        let gain = scorer(savings().saving(p));
        if Self::passes(gain, eager) {
            self.image.set(x, y);
            self.requeue_neighbors(x, y, false);
        } else if templates {
            self.fill_from_template(x, y, p);
        }
    }

    fn erode_cell(&mut self, x: i32, y: i32, scorer: Scorer, eager: bool) {
        if !self.image.solid(x, y) {
            return;
        }
        if !self.future.contains(self.src.color(x, y)) {
            return;
        }
        let p = Pattern::from_image(&self.image, x, y);
        let gain = scorer(savings().saving(p));
        if Self::passes(gain, eager) {
            self.image.clear(x, y);
            self.requeue_neighbors(x, y, true);
        }
    }

    /// Try the template library on a declined accretion candidate. The first
    /// template whose walk yields a clean run of length ≥ 2 fills it; a run
    /// interrupted by a past-colour cell aborts that template untouched.
    fn fill_from_template(&mut self, x: i32, y: i32, p: Pattern) {
        for t in template::library() {
            if !t.matches(p) {
                continue;
            }
            let (dx, dy) = t.walk;
            let (sx, sy) = t.side;
            let mut run = Vec::new();
            let mut blocked = false;
            let (mut cx, mut cy) = (x, y);
            loop {
                if self.image.solid(cx, cy) {
                    break; // run closed against existing solid
                }
                if !self.image.solid(cx + sx, cy + sy) {
                    break; // side support ended
                }
                if !self.reduces(self.src.color(cx, cy)) {
                    blocked = true;
                    break;
                }
                run.push((cx, cy));
                cx += dx;
                cy += dy;
            }
            if blocked || run.len() < 2 {
                continue;
            }
            for &(fx, fy) in &run {
                self.image.set(fx, fy);
            }
            for &(fx, fy) in &run {
                self.requeue_neighbors(fx, fy, false);
            }
            tracing::trace!(
                target: "optimize.clever",
                x,
                y,
                len = run.len(),
                "template fill"
            );
            return;
        }
    }
}

impl<'g, G: Grid> Process for Job<'g, G> {
    fn process(&mut self) -> bool {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_grid::DenseGrid;
    use core_scribe::saved_draws;

    fn future(colors: &[u32]) -> ColorSet {
        colors.iter().copied().collect()
    }

    fn run<'g, G: Grid>(job: &mut Job<'g, G>) {
        while job.step() {}
    }

    #[test]
    fn prepare_rejects_transparent_current() {
        let g = DenseGrid::empty(2, 2);
        let err = Strategy::Minimal.prepare(&g, 0, &future(&[1])).unwrap_err();
        assert_eq!(err, OptimizeError::TransparentCurrent);
    }

    #[test]
    fn prepare_rejects_current_in_future() {
        let g = DenseGrid::empty(2, 2);
        let err = Strategy::Mapped.prepare(&g, 2, &future(&[1, 2])).unwrap_err();
        assert_eq!(err, OptimizeError::CurrentInFuture(2));
    }

    #[test]
    fn minimal_keeps_only_the_current_colour() {
        let g = DenseGrid::new(2, 2, vec![1, 2, 0, 1]).unwrap();
        let mut job = Strategy::Minimal.prepare(&g, 1, &future(&[2])).unwrap();
        assert!(!job.step());
        let img = job.image();
        assert!(img.solid(0, 0));
        assert!(img.solid(1, 1));
        assert!(!img.solid(1, 0));
        assert!(!img.solid(0, 1));
    }

    #[test]
    fn mapped_includes_current_and_future() {
        let g = DenseGrid::new(2, 2, vec![1, 2, 3, 0]).unwrap();
        let mut job = Strategy::Mapped.prepare(&g, 1, &future(&[2])).unwrap();
        assert!(!job.step());
        let img = job.image();
        assert!(img.solid(0, 0));
        assert!(img.solid(1, 0));
        // Colour 3 is past here, colour 0 is transparent: both stay void.
        assert!(!img.solid(0, 1));
        assert!(!img.solid(1, 1));
    }

    #[test]
    fn accreting_fills_an_enclosed_future_hole() {
        // Ring of colour 1 around a single future cell.
        let g = DenseGrid::from_fn(3, 3, |x, y| if x == 1 && y == 1 { 2 } else { 1 });
        let mut job = Strategy::Accreting {
            scorer: saved_draws,
            eager: false,
        }
        .prepare(&g, 1, &future(&[2]))
        .unwrap();
        run(&mut job);
        assert!(job.image().solid(1, 1));
        assert_eq!(job.image().count(), 9);
    }

    #[test]
    fn accreting_leaves_an_isolated_grid_unchanged() {
        let g = DenseGrid::new(1, 1, vec![1]).unwrap();
        let mut job = Strategy::Accreting {
            scorer: saved_draws,
            eager: false,
        }
        .prepare(&g, 1, &future(&[2]))
        .unwrap();
        run(&mut job);
        assert!(job.image().solid(0, 0));
        assert_eq!(job.image().count(), 1);
    }

    #[test]
    fn eager_accretion_takes_zero_savings() {
        // A future cell flush against the current cell: the pair traces for
        // the same cost as the single cell, so only eager accretion takes it.
        let g = DenseGrid::new(2, 1, vec![1, 2]).unwrap();
        let reluctant = {
            let mut job = Strategy::Accreting {
                scorer: saved_draws,
                eager: false,
            }
            .prepare(&g, 1, &future(&[2]))
            .unwrap();
            run(&mut job);
            job.into_image()
        };
        assert!(!reluctant.solid(1, 0));
        let eager = {
            let mut job = Strategy::Accreting {
                scorer: saved_draws,
                eager: true,
            }
            .prepare(&g, 1, &future(&[2]))
            .unwrap();
            run(&mut job);
            job.into_image()
        };
        assert!(eager.solid(1, 0));
    }

    #[test]
    fn eroding_drops_an_isolated_future_cell() {
        let g = DenseGrid::from_fn(5, 5, |x, y| {
            if x == 0 && y == 0 {
                1
            } else if x == 4 && y == 4 {
                2
            } else {
                0
            }
        });
        let mut job = Strategy::Eroding {
            scorer: saved_draws,
            eager: false,
        }
        .prepare(&g, 1, &future(&[2]))
        .unwrap();
        run(&mut job);
        assert!(job.image().solid(0, 0), "current cells are never eroded");
        assert!(!job.image().solid(4, 4));
        assert_eq!(job.image().count(), 1);
    }

    #[test]
    fn jobs_drive_as_processes() {
        let g = DenseGrid::from_fn(4, 4, |x, _| 1 + x % 2);
        let mut job = Strategy::Accreting {
            scorer: saved_draws,
            eager: false,
        }
        .prepare(&g, 1, &future(&[2]))
        .unwrap();
        core_trace::drive(&mut job);
        assert!(!job.step());
    }
}
