//! Shape-level assertions on traced outlines: command grammar, endpoint
//! ranges, and even-odd coverage of hand-drawn pictures.

mod common;

use common::{picture, trace_paths};
use core_grid::{Grid, Point};
use core_layout::RectLayout;
use core_scribe::Scribe;
use core_trace::{Process, Tracer, drive};

/// Scribe asserting the move/draw/close grammar as commands arrive.
#[derive(Default)]
struct GrammarScribe {
    open: bool,
    moves: u32,
    closes: u32,
    points: Vec<Point>,
}

impl Scribe for GrammarScribe {
    fn move_to(&mut self, p: Point) {
        // A move may open a fresh subpath or abandon an open one; the tracer
        // never does the latter, which close() below verifies.
        assert!(!self.open, "move before the previous close");
        self.open = true;
        self.moves += 1;
        self.points.push(p);
    }

    fn draw_to(&mut self, p: Point) {
        assert!(self.open, "draw outside a subpath");
        self.points.push(p);
    }

    fn close(&mut self) {
        assert!(self.open, "close without an open subpath");
        self.open = false;
        self.closes += 1;
    }
}

#[test]
fn stream_is_well_formed_and_balanced() {
    let g = picture(&[
        "##..#",
        "##.##",
        "..###",
        "#....",
    ]);
    let mut t = Tracer::new(RectLayout::from_grid(&g), GrammarScribe::default());
    drive(&mut t);
    let s = t.scribe();
    assert!(!s.open, "stream ended with an open subpath");
    assert_eq!(s.moves, s.closes);
    assert!(s.moves > 0);
}

#[test]
fn endpoints_stay_on_the_lattice_bounds() {
    let g = picture(&[
        ".#.",
        "###",
        ".#.",
    ]);
    let mut t = Tracer::new(RectLayout::from_grid(&g), GrammarScribe::default());
    drive(&mut t);
    for p in &t.scribe().points {
        assert!(p.x >= 0 && p.x <= g.width() as i32);
        assert!(p.y >= 0 && p.y <= g.height() as i32);
    }
}

#[test]
fn coverage_matches_the_picture() {
    let rows = [
        "###.#",
        "#.#.#",
        "###.#",
        ".....",
        "##.##",
    ];
    let g = picture(&rows);
    let s = trace_paths(&g);
    for y in 0..g.height() as i32 {
        for x in 0..g.width() as i32 {
            assert_eq!(
                s.covers(x, y),
                g.solid(x, y),
                "cell ({x}, {y}) coverage diverged"
            );
        }
    }
}

#[test]
fn checkerboard_coverage_is_exact() {
    let g = core_grid::DenseGrid::from_fn(6, 6, |x, y| (x + y) % 2);
    let s = trace_paths(&g);
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(s.covers(x, y), (x + y) % 2 == 1);
        }
    }
}

#[test]
fn tracer_reports_done_exactly_once() {
    let g = picture(&["#"]);
    let mut t = Tracer::new(RectLayout::from_grid(&g), GrammarScribe::default());
    let mut calls = 0;
    while t.process() {
        calls += 1;
        assert!(calls < 1000, "tracer failed to terminate");
    }
    // Exhausted tracers stay exhausted.
    assert!(!t.process());
    assert!(!t.process());
}
