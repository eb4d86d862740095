//! Cooperative processes and the outline tracer.
//!
//! Everything long-running in the engine is a [`Process`]: a repeatable
//! `process()` call doing a bounded slice of work and reporting whether any
//! remains. Processes never block and never yield to each other, so an
//! external scheduler can interleave, cancel between calls, or hand a batch
//! to the thread pool with [`drive_all`].

use rayon::prelude::*;

mod tracer;

pub use tracer::Tracer;

/// A resumable unit of work.
pub trait Process {
    /// Perform one bounded step. Returns true while work remains.
    fn process(&mut self) -> bool;
}

impl<P: Process + ?Sized> Process for &mut P {
    fn process(&mut self) -> bool {
        (**self).process()
    }
}

impl<P: Process + ?Sized> Process for Box<P> {
    fn process(&mut self) -> bool {
        (**self).process()
    }
}

/// Run a single process to completion.
pub fn drive<P: Process + ?Sized>(p: &mut P) {
    while p.process() {}
}

/// Run every process to completion on the rayon pool.
///
/// The processes are mutually independent by construction (each owns its
/// layout and scribe), so completion order is irrelevant; only the caller's
/// slice order carries meaning.
pub fn drive_all<P: Process + Send>(processes: &mut [P]) {
    processes.par_iter_mut().for_each(|p| drive(p));
}
