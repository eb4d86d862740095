//! Polygon-collecting sink with even-odd hit testing.

use core_grid::Point;

use crate::Scribe;

/// Scribe that collects closed polygons as vertex lists.
///
/// `move_to` finishes any open subpath (keeping it only if it has at least
/// one segment) and starts a new one; a `draw_to` with no open subpath is
/// lenient and opens one at its target. Consumers get the finished polygons
/// via [`paths`](Self::paths); each polygon is implicitly closed back to its
/// first vertex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathScribe {
    paths: Vec<Vec<Point>>,
    open: Option<Vec<Point>>,
}

impl PathScribe {
    pub fn new() -> Self {
        Self::default()
    }

    fn finish(&mut self) {
        if let Some(p) = self.open.take() {
            if p.len() > 1 {
                self.paths.push(p);
            }
        }
    }

    /// Finished closed paths, in emission order.
    pub fn paths(&self) -> &[Vec<Point>] {
        &self.paths
    }

    /// Count of finished paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Even-odd containment of the centre of cell `(x, y)`.
    ///
    /// Casts a ray from `(x + ½, y + ½)` towards +x and counts crossings with
    /// the vertical segments of every finished path (segments here are always
    /// axis-aligned with integer endpoints, so the half-offset sample point
    /// makes the count exact). An odd total means the cell is filled.
    pub fn covers(&self, x: i32, y: i32) -> bool {
        let mut crossings = 0usize;
        for path in &self.paths {
            let n = path.len();
            for i in 0..n {
                let a = path[i];
                let b = path[(i + 1) % n];
                if a.x != b.x {
                    continue; // horizontal segments never cross the ray
                }
                if a.x <= x {
                    continue; // strictly right of the sample point only
                }
                let (lo, hi) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
                if lo <= y && y < hi {
                    crossings += 1;
                }
            }
        }
        crossings % 2 == 1
    }
}

impl Scribe for PathScribe {
    fn move_to(&mut self, p: Point) {
        self.finish();
        self.open = Some(vec![p]);
    }

    fn draw_to(&mut self, p: Point) {
        self.open.get_or_insert_with(Vec::new).push(p);
    }

    fn close(&mut self) {
        self.finish();
    }
}
