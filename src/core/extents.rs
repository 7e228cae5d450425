use serde::{Deserialize, Serialize};

use crate::core::Point;

/// Running min/max over a set of samples.
///
/// An empty set is represented by the sentinel `{+inf, -inf}` on both axes so
/// that folding any finite sample into it yields that sample's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Extents {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extents {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        points.iter().fold(Self::empty(), |mut acc, point| {
            acc.include(point.x, point.y);
            acc
        })
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    pub fn include(&mut self, x: f64, y: f64) {
        self.include_x(x);
        self.include_y(y);
    }

    pub fn include_x(&mut self, x: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
    }

    pub fn include_y(&mut self, y: f64) {
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Returns `true` when `point` sits on any of the current bounds.
    ///
    /// Removing or moving such a point requires a rescan to keep bounds exact.
    #[must_use]
    pub fn touches(self, point: Point) -> bool {
        point.x == self.x_min
            || point.x == self.x_max
            || point.y == self.y_min
            || point.y == self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::Extents;
    use crate::core::Point;

    #[test]
    fn empty_sentinel_absorbs_first_sample() {
        let mut extents = Extents::empty();
        assert!(extents.is_empty());
        extents.include(2.0, -3.0);
        assert!(!extents.is_empty());
        assert_eq!(extents.x_min, 2.0);
        assert_eq!(extents.x_max, 2.0);
        assert_eq!(extents.y_min, -3.0);
        assert_eq!(extents.y_max, -3.0);
    }

    #[test]
    fn union_with_empty_is_identity() {
        let extents = Extents::from_points(&[Point::new(0.0, 1.0), Point::new(4.0, -1.0)]);
        assert_eq!(extents.union(Extents::empty()), extents);
    }
}
