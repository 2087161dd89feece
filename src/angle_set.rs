use crate::error::{Result, ScoutError};
use std::f64::consts::PI;

/// Union of disjoint closed angular intervals on the circle.
///
/// Intervals are kept sorted by start and never overlap; overlapping or
/// touching inserts are merged. Every insert is padded by `eps` on both
/// sides, so stored bounds may reach `[-PI - eps, PI + eps]`.
#[derive(Clone, Debug, Default)]
pub struct AngleSet {
    intervals: Vec<(f64, f64)>,
    eps: f64,
}

impl AngleSet {
    pub fn new(eps: f64) -> Self {
        AngleSet {
            intervals: Vec::new(),
            eps,
        }
    }

    /// Add the interval from `a` to `b`, counter-clockwise.
    /// When `b < a` the interval crosses the -PI/PI seam and is stored as two pieces.
    pub fn add_interval(&mut self, a: f64, b: f64) -> Result<()> {
        validate_angle(a)?;
        validate_angle(b)?;

        for (start, end) in split_at_seam(a, b) {
            self.insert(start, end);
        }
        Ok(())
    }

    /// Check if the union strictly contains `[a, b]` (same seam rule as `add_interval`)
    pub fn contains(&self, a: f64, b: f64) -> Result<bool> {
        validate_angle(a)?;
        validate_angle(b)?;

        Ok(split_at_seam(a, b)
            .into_iter()
            .all(|(start, end)| self.contains_unwrapped(start, end)))
    }

    pub fn intervals(&self) -> &[(f64, f64)] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    fn insert(&mut self, a: f64, b: f64) {
        let a = a - self.eps;
        let b = b + self.eps;

        let left = self.find_left(a);
        // One past the last interval starting at or before b
        let right_end = (self.find_right(b) + 1) as usize;

        let (mut start, mut end) = (a, b);
        if left < right_end {
            start = start.min(self.intervals[left].0);
            end = end.max(self.intervals[right_end - 1].1);
        }

        self.intervals.splice(left..right_end, [(start, end)]);
    }

    fn contains_unwrapped(&self, a: f64, b: f64) -> bool {
        match self.intervals.get(self.find_left(a)) {
            Some(&(start, end)) => start < a && end > b,
            None => false,
        }
    }

    /// Index of the first interval ending at or after `a`, or `len()` if none
    pub(crate) fn find_left(&self, a: f64) -> usize {
        self.intervals.partition_point(|&(_, end)| end < a)
    }

    /// Index of the last interval starting at or before `b`, or -1 if none
    pub(crate) fn find_right(&self, b: f64) -> isize {
        self.intervals.partition_point(|&(start, _)| start <= b) as isize - 1
    }
}

fn validate_angle(angle: f64) -> Result<()> {
    if (-PI..=PI).contains(&angle) {
        Ok(())
    } else {
        Err(ScoutError::AngleOutOfRange(angle))
    }
}

/// At most two non-wrapping pieces covering the interval from `a` to `b`
fn split_at_seam(a: f64, b: f64) -> Vec<(f64, f64)> {
    if b < a {
        vec![(a, PI), (-PI, b)]
    } else {
        vec![(a, b)]
    }
}
