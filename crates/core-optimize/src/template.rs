//! Corner and projection fill templates.
//!
//! When plain scoring declines a candidate cell, the clever optimiser checks
//! whether the cell sits at the start of a linear notch worth filling as a
//! run. A template is an (included, excluded) 3×3 mask pair plus a walk
//! direction and the 90° side the run leans on. The canonical orientation
//! walks east leaning south: the candidate has solid support to the west and
//! south, open space to the north and east, and the four shapes are
//! distinguished by the two diagonal support bits. The other twelve entries
//! are the three clockwise rotations of the canonical four.

use std::sync::LazyLock;

use crate::Pattern;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Template {
    pub include: u16,
    pub exclude: u16,
    /// Direction the fill run advances in.
    pub walk: (i32, i32),
    /// 90° turn from `walk`; the side cell that must stay solid.
    pub side: (i32, i32),
}

impl Template {
    pub fn matches(&self, p: Pattern) -> bool {
        p.bits() & self.include == self.include && p.bits() & self.exclude == 0
    }
}

/// Mask bit for the neighbourhood offset `(dx, dy)`.
const fn bit(dx: i32, dy: i32) -> u16 {
    1 << ((dy + 1) * 3 + (dx + 1))
}

fn rotate_mask(m: u16) -> u16 {
    let mut out = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if m & bit(dx, dy) != 0 {
                out |= bit(-dy, dx);
            }
        }
    }
    out
}

fn rotate_dir((dx, dy): (i32, i32)) -> (i32, i32) {
    (-dy, dx)
}

fn build() -> [Template; 16] {
    const W: u16 = bit(-1, 0);
    const E: u16 = bit(1, 0);
    const N: u16 = bit(0, -1);
    const S: u16 = bit(0, 1);
    const NW: u16 = bit(-1, -1);
    const SW: u16 = bit(-1, 1);
    // (included, excluded) in the canonical east/south orientation. The NW
    // and SW bits split the family into four disjoint shapes.
    let shapes: [(u16, u16); 4] = [
        (W | S, N | E | NW | SW),      // projection, thin edge
        (W | S | NW, N | E | SW),      // projection, thick edge
        (W | S | SW, N | E | NW),      // corner, short wall
        (W | S | NW | SW, N | E),      // corner, full wall
    ];
    let mut out = Vec::with_capacity(16);
    for &(include, exclude) in &shapes {
        let (mut i, mut e) = (include, exclude);
        let mut walk = (1, 0);
        let mut side = (0, 1);
        for _ in 0..4 {
            out.push(Template {
                include: i,
                exclude: e,
                walk,
                side,
            });
            i = rotate_mask(i);
            e = rotate_mask(e);
            walk = rotate_dir(walk);
            side = rotate_dir(side);
        }
    }
    out.try_into().expect("sixteen templates")
}

static LIBRARY: LazyLock<[Template; 16]> = LazyLock::new(build);

pub(crate) fn library() -> &'static [Template; 16] {
    &LIBRARY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_disjoint_masks() {
        let lib = library();
        assert_eq!(lib.len(), 16);
        for t in lib {
            assert_eq!(t.include & t.exclude, 0, "overlapping masks");
            // Walk and side are perpendicular unit vectors.
            assert_eq!(t.walk.0 * t.side.0 + t.walk.1 * t.side.1, 0);
            assert_eq!(t.walk.0.abs() + t.walk.1.abs(), 1);
        }
    }

    #[test]
    fn rotation_maps_west_to_north() {
        assert_eq!(rotate_mask(bit(-1, 0)), bit(0, -1));
        assert_eq!(rotate_dir((1, 0)), (0, 1));
        assert_eq!(rotate_dir((0, 1)), (-1, 0));
    }

    #[test]
    fn canonical_corner_matches_an_inner_notch() {
        // Wall to the west, floor to the south, both diagonals filled:
        //   X . .
        //   X c .
        //   X X X
        let p = Pattern::new(
            bit(-1, -1) | bit(-1, 0) | bit(-1, 1) | bit(0, 1) | bit(1, 1),
        );
        let hits: Vec<_> = library().iter().filter(|t| t.matches(p)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].walk, (1, 0));
        assert_eq!(hits[0].side, (0, 1));
    }

    #[test]
    fn rotated_notch_matches_the_rotated_entry() {
        // The inner-notch picture rotated 90° clockwise: wall to the north,
        // floor to the west, walking south leaning west.
        let p = Pattern::new(
            bit(-1, -1) | bit(0, -1) | bit(1, -1) | bit(-1, 0) | bit(-1, 1),
        );
        let hits: Vec<_> = library().iter().filter(|t| t.matches(p)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].walk, (0, 1));
        assert_eq!(hits[0].side, (-1, 0));
    }

    #[test]
    fn open_space_matches_nothing() {
        assert!(library().iter().all(|t| !t.matches(Pattern::new(0))));
        // A lone west support is not enough for any shape.
        assert!(
            library()
                .iter()
                .all(|t| !t.matches(Pattern::new(bit(-1, 0))))
        );
    }
}
