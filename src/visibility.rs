use crate::angle_set::AngleSet;
use crate::corners::CornerAngleCache;
use crate::error::{Result, ScoutError};
use crate::grid::BitGrid;
use log::{debug, trace};
use std::collections::HashMap;

/// Padding applied to every blocked interval
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Radius-limited shadow casting over a partially known map.
///
/// Walls and undiscovered cells block vision; discovered floors don't.
/// Results are memoized per (x, y, radius) when no undiscovered cell took
/// part in blocking, since those are the only cells whose status can change.
pub struct VisibilityEngine {
    width: i32,
    height: i32,
    eps: f64,
    corners: CornerAngleCache,
    cache: HashMap<(i32, i32, i32), BitGrid>,
}

/// Outcome of a single sweep
struct Sweep {
    visible: BitGrid,
    /// An undiscovered cell blocked part of the view
    provisional: bool,
}

impl VisibilityEngine {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_epsilon(width, height, DEFAULT_EPSILON)
    }

    pub fn with_epsilon(width: i32, height: i32, eps: f64) -> Self {
        VisibilityEngine {
            width,
            height,
            eps,
            corners: CornerAngleCache::new(width, height),
            cache: HashMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Cells visible from (x, y) within `radius`, always including (x, y) itself.
    ///
    /// Only cells with squared distance strictly below `radius * radius` are considered.
    /// Undiscovered non-wall cells are reported visible but block what lies behind them.
    pub fn visible_from(
        &mut self,
        x: i32,
        y: i32,
        radius: i32,
        walls: &BitGrid,
        discovered: &BitGrid,
    ) -> Result<BitGrid> {
        self.check_dimensions(walls)?;
        self.check_dimensions(discovered)?;
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return Err(ScoutError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let key = (x, y, radius);
        if let Some(visible) = self.cache.get(&key) {
            trace!("visibility cache hit at ({}, {}) r={}", x, y, radius);
            return Ok(visible.clone());
        }

        let sweep = self.sweep(x, y, radius, walls, discovered)?;
        debug!(
            "visibility from ({}, {}) r={}: {} cells{}",
            x,
            y,
            radius,
            sweep.visible.count(),
            if sweep.provisional { " (provisional)" } else { "" }
        );

        if !sweep.provisional {
            self.cache.insert(key, sweep.visible.clone());
        }
        Ok(sweep.visible)
    }

    /// Whether a memoized answer exists for this origin and radius
    pub fn is_cached(&self, x: i32, y: i32, radius: i32) -> bool {
        self.cache.contains_key(&(x, y, radius))
    }

    pub fn cached_origins(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn check_dimensions(&self, grid: &BitGrid) -> Result<()> {
        if grid.width() != self.width || grid.height() != self.height {
            return Err(ScoutError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (grid.width(), grid.height()),
            });
        }
        Ok(())
    }

    fn sweep(
        &mut self,
        x: i32,
        y: i32,
        radius: i32,
        walls: &BitGrid,
        discovered: &BitGrid,
    ) -> Result<Sweep> {
        let cells = ring_ordered_offsets(x, y, radius, self.width, self.height);

        let mut visible = BitGrid::new(self.width, self.height);
        visible.set(x, y);

        let mut blocked = AngleSet::new(self.eps);
        let mut pending: Vec<(f64, f64)> = Vec::new();
        let mut ring = -1;
        let mut provisional = false;

        for (dx, dy, dist2) in cells {
            // Cells at the same distance never shadow each other
            if dist2 > ring {
                for (a, b) in pending.drain(..) {
                    blocked.add_interval(a, b)?;
                }
                ring = dist2;
            }

            let (a, b) = self.corners.occlusion_interval(dx, dy);
            if blocked.contains(a, b)? {
                continue;
            }

            let (rx, ry) = (x + dx, y + dy);
            let wall = walls.get(rx, ry);
            if !wall {
                visible.set(rx, ry);
            }
            if !discovered.get(rx, ry) {
                if !wall {
                    provisional = true;
                }
                pending.push((a, b));
            }
        }

        Ok(Sweep {
            visible,
            provisional,
        })
    }
}

/// Offsets within `radius` of (x, y), clipped to the grid, nearest first.
/// Ties keep row-major order.
fn ring_ordered_offsets(x: i32, y: i32, radius: i32, width: i32, height: i32) -> Vec<(i32, i32, i64)> {
    // Past width + height every cell of the grid is already in range
    let radius = radius.clamp(0, width + height);
    let r2 = i64::from(radius) * i64::from(radius);
    let min_dx = (-x).max(-radius);
    let max_dx = (width - 1 - x).min(radius);
    let min_dy = (-y).max(-radius);
    let max_dy = (height - 1 - y).min(radius);

    let mut cells = Vec::new();
    for dy in min_dy..=max_dy {
        for dx in min_dx..=max_dx {
            if dx == 0 && dy == 0 {
                continue;
            }
            let dist2 = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if dist2 < r2 {
                cells.push((dx, dy, dist2));
            }
        }
    }

    cells.sort_by_key(|&(_, _, dist2)| dist2);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i32, height: i32) -> (BitGrid, BitGrid) {
        let walls = BitGrid::new(width, height);
        let mut discovered = BitGrid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                discovered.set(x, y);
            }
        }
        (walls, discovered)
    }

    #[test]
    fn test_ring_order() {
        let cells = ring_ordered_offsets(2, 2, 2, 5, 5);
        assert_eq!(cells.len(), 8);
        assert!(cells.windows(2).all(|w| w[0].2 <= w[1].2));
        assert_eq!(&cells[..4], &[(0, -1, 1), (-1, 0, 1), (1, 0, 1), (0, 1, 1)]);
    }

    #[test]
    fn test_ring_clipped_to_grid() {
        let cells = ring_ordered_offsets(0, 0, 3, 5, 5);
        assert!(cells.iter().all(|&(dx, dy, _)| dx >= 0 && dy >= 0));
        // (1,0) (0,1) (1,1) (2,0) (0,2) (2,1) (1,2) (2,2)
        assert_eq!(cells.len(), 8);
    }

    #[test]
    fn test_strict_radius() {
        let (walls, discovered) = open_grid(7, 7);
        let mut engine = VisibilityEngine::new(7, 7);

        let r2 = engine.visible_from(3, 3, 2, &walls, &discovered).unwrap();
        assert_eq!(r2.count(), 9);
        assert!(!r2.get(5, 3));

        let r3 = engine.visible_from(3, 3, 3, &walls, &discovered).unwrap();
        assert_eq!(r3.count(), 25);
        assert!(r3.get(5, 5));
        assert!(!r3.get(6, 3));
    }

    #[test]
    fn test_huge_radius_covers_whole_grid() {
        let (walls, discovered) = open_grid(5, 5);
        let mut engine = VisibilityEngine::new(5, 5);
        let visible = engine.visible_from(2, 2, 50_000, &walls, &discovered).unwrap();
        assert_eq!(visible.count(), 25);

        let visible = engine.visible_from(0, 0, i32::MAX, &walls, &discovered).unwrap();
        assert_eq!(visible.count(), 25);
        assert_eq!(ring_ordered_offsets(4, 4, i32::MAX, 5, 5).len(), 24);
    }

    #[test]
    fn test_radius_one_sees_only_origin() {
        let (walls, discovered) = open_grid(3, 3);
        let mut engine = VisibilityEngine::new(3, 3);
        let visible = engine.visible_from(1, 1, 1, &walls, &discovered).unwrap();
        assert_eq!(visible.iter().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn test_rejects_bad_input() {
        let (walls, discovered) = open_grid(4, 4);
        let mut engine = VisibilityEngine::new(5, 5);
        assert!(matches!(
            engine.visible_from(1, 1, 3, &walls, &discovered),
            Err(ScoutError::DimensionMismatch { .. })
        ));

        let mut engine = VisibilityEngine::new(4, 4);
        assert!(matches!(
            engine.visible_from(4, 0, 3, &walls, &discovered),
            Err(ScoutError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_caches_only_settled_results() {
        let walls = BitGrid::new(5, 5);
        let discovered = BitGrid::new(5, 5);
        let mut engine = VisibilityEngine::new(5, 5);

        engine.visible_from(2, 2, 3, &walls, &discovered).unwrap();
        assert!(!engine.is_cached(2, 2, 3));

        let (walls, discovered) = open_grid(5, 5);
        engine.visible_from(2, 2, 3, &walls, &discovered).unwrap();
        assert!(engine.is_cached(2, 2, 3));
        assert!(!engine.is_cached(2, 2, 2));
        assert_eq!(engine.cached_origins(), 1);

        engine.clear_cache();
        assert_eq!(engine.cached_origins(), 0);
    }
}
