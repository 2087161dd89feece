use std::f64::consts::PI;

/// Lazily memoized bearings of cell corners, as seen from the origin cell's center.
///
/// Corner (cx, cy) sits at half-integer offsets in `[-W + 0.5, W - 0.5] x [-H + 0.5, H - 0.5]`,
/// so every offset reachable inside a `W x H` grid has all four corners in the table.
/// Neighbouring offsets share corners; each one is computed at most once.
pub struct CornerAngleCache {
    width: i32,
    height: i32,
    /// Corners per row (2 * width)
    stride: i32,
    cache: Vec<Option<f64>>,
}

impl CornerAngleCache {
    pub fn new(width: i32, height: i32) -> Self {
        let stride = 2 * width;
        CornerAngleCache {
            width,
            height,
            stride,
            cache: vec![None; (stride * 2 * height).max(0) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bearings of the four corners of the cell at offset (dx, dy):
    /// `[top_left, top_right, bottom_right, bottom_left]`.
    /// `dx` must lie in `(-W, W)` and `dy` in `(-H, H)`.
    pub fn corners(&mut self, dx: i32, dy: i32) -> [f64; 4] {
        let top_left = ((dy + self.height - 1) * self.stride + (dx + self.width - 1)) as usize;
        let top_right = top_left + 1;
        let bottom_left = top_left + self.stride as usize;
        let bottom_right = bottom_left + 1;

        let (fx, fy) = (dx as f64, dy as f64);
        [
            self.bearing(top_left, fy - 0.5, fx - 0.5),
            self.bearing(top_right, fy - 0.5, fx + 0.5),
            self.bearing(bottom_right, fy + 0.5, fx + 0.5),
            self.bearing(bottom_left, fy + 0.5, fx - 0.5),
        ]
    }

    /// The pair of corner bearings that block the most vision.
    ///
    /// Returns `(start, end)` going counter-clockwise; `end < start` when the
    /// cell straddles the -PI/PI seam (only cells directly left of the origin).
    pub fn occlusion_interval(&mut self, dx: i32, dy: i32) -> (f64, f64) {
        let mut angles = self.corners(dx, dy);
        angles.sort_by(f64::total_cmp);

        if angles[3] - angles[0] > PI {
            (angles[2], angles[1])
        } else {
            (angles[0], angles[3])
        }
    }

    /// Argument order is (y, x), as `atan2`
    fn bearing(&mut self, index: usize, y: f64, x: f64) -> f64 {
        *self.cache[index].get_or_insert_with(|| y.atan2(x))
    }
}
