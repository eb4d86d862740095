//! Outline tracer: walks a layout, emits closed paths.
//!
//! Selection contract per transition, given the current step `cur`:
//! * A successor parallel to `cur` is taken unconditionally (straight
//!   through; crossings are never turned into corners).
//! * Otherwise the walk turns. Successors antiparallel to another successor
//!   are demoted to secondary; the first primary wins, then the first
//!   secondary. At a half-consumed crossing this leaves the matching
//!   antiparallel edge for the opposite pass, so both lobes get traced.
//! * Commands are withheld until the walk meets its first corner: the move
//!   lands on a corner, later turns emit draws, exhaustion emits the final
//!   draw and the close. Steps walked before the first corner stay
//!   unconsumed and are re-walked (and only then drawn) when the loop comes
//!   back around.
//!
//! The tracer is total: any well-formed layout terminates, and an empty one
//! produces no commands at all.

use core_layout::{Layout, Step};
use core_scribe::Scribe;

use crate::Process;

pub struct Tracer<L: Layout, S: Scribe> {
    layout: L,
    scribe: S,
    cur: Option<Step>,
    corner_found: bool,
}

impl<L: Layout, S: Scribe> Tracer<L, S> {
    pub fn new(layout: L, scribe: S) -> Self {
        Self {
            layout,
            scribe,
            cur: None,
            corner_found: false,
        }
    }

    pub fn scribe(&self) -> &S {
        &self.scribe
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn into_scribe(self) -> S {
        self.scribe
    }

    /// Pick the next step out of `cur`'s end vertex. Returns the step (if
    /// any) and whether taking it turns the walk.
    fn select(&self, cur: Step) -> (Option<Step>, bool) {
        let succ = self.layout.options(cur);
        if let Some(&straight) = succ.iter().find(|&&s| self.layout.parallel(s, cur)) {
            return (Some(straight), false);
        }
        let mut primary = None;
        let mut secondary = None;
        for (i, &s) in succ.iter().enumerate() {
            let demoted = succ
                .iter()
                .enumerate()
                .any(|(j, &t)| j != i && self.layout.antiparallel(s, t));
            if demoted {
                if secondary.is_none() {
                    secondary = Some(s);
                }
            } else if primary.is_none() {
                primary = Some(s);
            }
        }
        (primary.or(secondary), true)
    }
}

impl<L: Layout, S: Scribe> Process for Tracer<L, S> {
    fn process(&mut self) -> bool {
        let cur = match self.cur {
            Some(s) => s,
            None => {
                let Some(s) = self.layout.any_step() else {
                    return false;
                };
                self.corner_found = false;
                s
            }
        };
        if self.corner_found {
            self.layout.consume(cur);
        }
        let (next, turned) = self.select(cur);
        let vertex = self.layout.end(cur);
        if self.corner_found {
            if turned || next.is_none() {
                self.scribe.draw_to(vertex);
            }
            if next.is_none() {
                self.scribe.close();
                tracing::trace!(target: "trace", x = vertex.x, y = vertex.y, "path closed");
            }
        } else if turned {
            self.corner_found = true;
            self.scribe.move_to(vertex);
        }
        self.cur = next;
        true
    }
}
