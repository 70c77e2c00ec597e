use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Point2,
    pub p2: Point2,
}

impl Segment {
    /// Creates a segment from its two endpoints.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }

    /// Returns `true` if this segment crosses or touches `other`.
    ///
    /// Parallel and collinear segments never intersect.
    #[must_use]
    pub fn intersects(&self, other: &Segment) -> bool {
        self.intersection(other).is_some()
    }

    /// Returns the intersection point with `other`, if any.
    #[must_use]
    pub fn intersection(&self, other: &Segment) -> Option<Point2> {
        segment_segment_intersect_2d(&self.p1, &self.p2, &other.p1, &other.p2).map(|(pt, _, _)| pt)
    }
}
