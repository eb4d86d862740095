//! Property tests: every optimiser's output sits between the minimal and
//! mapped images, and the phases move monotonically.

use core_grid::{BitGrid, ColorSet, DenseGrid};
use core_optimize::Strategy as OptimizeStrategy;
use core_scribe::{saved_draws, saved_size};
use proptest::prelude::*;

fn arb_grid() -> impl proptest::strategy::Strategy<Value = DenseGrid> {
    (2u32..7, 2u32..7).prop_flat_map(|(w, h)| {
        proptest::collection::vec(0u32..4, (w * h) as usize)
            .prop_map(move |cells| DenseGrid::new(w, h, cells).unwrap())
    })
}

fn finish(grid: &DenseGrid, strategy: OptimizeStrategy, current: u32, future: &ColorSet) -> BitGrid {
    let mut job = strategy.prepare(grid, current, future).unwrap();
    while job.step() {}
    job.into_image()
}

fn subset(inner: &BitGrid, outer: &BitGrid) -> bool {
    for y in 0..inner.height() as i32 {
        for x in 0..inner.width() as i32 {
            if inner.solid(x, y) && !outer.solid(x, y) {
                return false;
            }
        }
    }
    true
}

proptest! {
    #[test]
    fn outputs_lie_between_minimal_and_mapped(grid in arb_grid(), eager in any::<bool>()) {
        let future: ColorSet = [2u32, 3].into_iter().collect();
        let minimal = finish(&grid, OptimizeStrategy::Minimal, 1, &future);
        let mapped = finish(&grid, OptimizeStrategy::Mapped, 1, &future);
        for strategy in [
            OptimizeStrategy::Accreting { scorer: saved_draws, eager },
            OptimizeStrategy::Eroding { scorer: saved_size, eager },
            OptimizeStrategy::Clever { accretion: saved_draws, erosion: saved_draws, eager },
        ] {
            let img = finish(&grid, strategy, 1, &future);
            prop_assert!(subset(&minimal, &img), "{} lost current cells", strategy.name());
            prop_assert!(subset(&img, &mapped), "{} exceeded the reducer", strategy.name());
        }
    }

    // Accretion never removes; stepping the job can only grow the count
    // until the (clever) erosion phase, which only shrinks it.
    #[test]
    fn accretion_grows_and_erosion_shrinks(grid in arb_grid()) {
        let future: ColorSet = [2u32, 3].into_iter().collect();
        let mut job = OptimizeStrategy::Accreting { scorer: saved_draws, eager: false }
            .prepare(&grid, 1, &future)
            .unwrap();
        let mut last = job.image().count();
        while job.step() {
            let now = job.image().count();
            prop_assert!(now >= last, "accretion removed a cell");
            last = now;
        }
        let mut job = OptimizeStrategy::Eroding { scorer: saved_draws, eager: false }
            .prepare(&grid, 1, &future)
            .unwrap();
        let mut last = job.image().count();
        while job.step() {
            let now = job.image().count();
            prop_assert!(now <= last, "erosion added a cell");
            last = now;
        }
    }

    #[test]
    fn optimisation_is_deterministic(grid in arb_grid()) {
        let future: ColorSet = [2u32].into_iter().collect();
        let strategy = OptimizeStrategy::Clever {
            accretion: saved_draws,
            erosion: saved_draws,
            eager: false,
        };
        let a = finish(&grid, strategy, 1, &future);
        let b = finish(&grid, strategy, 1, &future);
        prop_assert_eq!(a, b);
    }
}
