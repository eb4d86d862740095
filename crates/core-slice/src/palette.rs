//! Palette discovery.

use core_grid::{ColorSet, Grid};

/// Distinct non-transparent colours present in a grid.
pub fn collect_palette<G: Grid>(grid: &G) -> ColorSet {
    let mut palette = ColorSet::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let c = grid.color(x, y);
            if c != 0 {
                palette.insert(c);
            }
        }
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_grid::DenseGrid;

    #[test]
    fn skips_transparent_and_dedups() {
        let g = DenseGrid::new(3, 2, vec![0, 5, 2, 2, 0, 5]).unwrap();
        let p = collect_palette(&g);
        assert_eq!(p.iter().collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn empty_grid_yields_empty_palette() {
        assert!(collect_palette(&DenseGrid::empty(4, 4)).is_empty());
        assert!(collect_palette(&DenseGrid::empty(0, 0)).is_empty());
    }
}
