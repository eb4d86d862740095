//! Multi-optimiser tournament slicing.
//!
//! Per colour, every strategy in the roster races to completion against a
//! private tape scribe; the tape with the best score under the tournament
//! comparator wins, ties going to the earliest roster position. Only the
//! winning tape survives, wrapped in a [`ColorReplay`] that re-issues it to
//! the real output scribe one opcode per process step.

use core_grid::Grid;
use core_layout::RectLayout;
use core_optimize::{OptimizeError, Strategy};
use core_scribe::{Scribe, ScoreCmp, TapeScribe, by_size, saved_draws, saved_size};
use core_trace::{Process, Tracer, drive};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{ColorSelector, SliceError, collect_palette};

/// A strategy roster and the ordering that ranks their results.
#[derive(Clone, Debug)]
pub struct Tournament {
    pub strategies: Vec<Strategy>,
    pub comparator: ScoreCmp,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            strategies: vec![
                Strategy::Minimal,
                Strategy::Mapped,
                Strategy::Accreting {
                    scorer: saved_draws,
                    eager: false,
                },
                Strategy::Eroding {
                    scorer: saved_draws,
                    eager: false,
                },
                Strategy::Clever {
                    accretion: saved_draws,
                    erosion: saved_size,
                    eager: false,
                },
            ],
            comparator: by_size,
        }
    }
}

/// Replays a recorded winning trace into the externally supplied scribe.
#[derive(Debug)]
pub struct ColorReplay<S: Scribe> {
    color: u32,
    tape: TapeScribe,
    out: S,
    pos: usize,
}

impl<S: Scribe> ColorReplay<S> {
    pub fn color(&self) -> u32 {
        self.color
    }

    /// The recorded winner, unchanged by replay.
    pub fn tape(&self) -> &TapeScribe {
        &self.tape
    }

    pub fn scribe(&self) -> &S {
        &self.out
    }

    pub fn into_scribe(self) -> (u32, S) {
        (self.color, self.out)
    }
}

impl<S: Scribe> Process for ColorReplay<S> {
    fn process(&mut self) -> bool {
        if self.pos < self.tape.op_count() {
            self.tape.replay_op(self.pos, &mut self.out);
            self.pos += 1;
        }
        self.pos < self.tape.op_count()
    }
}

/// Slicer racing a tournament per colour.
pub struct MultiSlicer<Sel: ColorSelector> {
    pub selector: Sel,
    pub tournament: Tournament,
}

impl<Sel: ColorSelector> MultiSlicer<Sel> {
    pub fn new(selector: Sel, tournament: Tournament) -> Self {
        Self {
            selector,
            tournament,
        }
    }

    pub fn slice<G, S, F>(&self, grid: &G, mut scribes: F) -> Result<Vec<ColorReplay<S>>, SliceError>
    where
        G: Grid + Sync,
        S: Scribe,
        F: FnMut(u32) -> S,
    {
        if self.tournament.strategies.is_empty() {
            return Err(SliceError::EmptyRoster);
        }
        // Publish the saving table before the racing chains need it.
        core_optimize::init();
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
            // Race the whole roster; each chain owns its image, layout and
            // tape, so they share nothing but the source grid.
            let future = palette.clone();
            let tapes = self
                .tournament
                .strategies
                .par_iter()
                .map(|strategy| -> Result<TapeScribe, OptimizeError> {
                    let mut job = strategy.prepare(grid, color, &future)?;
                    while job.step() {}
                    let layout = RectLayout::from_grid(job.image());
                    let mut tracer = Tracer::new(layout, TapeScribe::new());
                    drive(&mut tracer);
                    Ok(tracer.into_scribe())
                })
                .collect::<Result<Vec<_>, _>>()?;
            let cmp = self.tournament.comparator;
            // min_by keeps the first of equal entries: ties go to the
            // earliest roster position.
            let winner = tapes
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| cmp(&a.score(), &b.score()))
                .map(|(i, _)| i)
                .expect("roster checked non-empty");
            debug!(
                target: "slice.tournament",
                color,
                winner = self.tournament.strategies[winner].name(),
                score = ?tapes[winner].score(),
                "tournament decided"
            );
            let tape = tapes.into_iter().nth(winner).expect("winner index in range");
            out.push(ColorReplay {
                color,
                tape,
                out: scribes(color),
                pos: 0,
            });
        }
        Ok(out)
    }
}
