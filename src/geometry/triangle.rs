use crate::math::polygon_2d::{is_degenerate_triangle, point_in_triangle_2d, triangle_signed_area};
use crate::math::Point2;

/// A triangle given by three points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2, p3: Point2) -> Self {
        Self { p1, p2, p3 }
    }

    /// Signed area, positive for counter-clockwise (y-up) winding.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        triangle_signed_area(&self.p1, &self.p2, &self.p3)
    }

    /// Returns `true` if the three points are (numerically) collinear.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        is_degenerate_triangle(&self.p1, &self.p2, &self.p3)
    }

    /// Returns `true` if the point lies inside or on the border.
    ///
    /// Always `false` for degenerate triangles.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point_in_triangle_2d(point, &self.p1, &self.p2, &self.p3)
    }
}
