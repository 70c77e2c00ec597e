use crate::math::polygon_2d::extents_2d;
use crate::math::{Point2, Vector2};

/// An axis-aligned rectangle given by its minimum corner and its size.
///
/// `Rect::default()` (origin, zero size) doubles as the bounds of an empty mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum corner (top-left in y-down screen coordinates).
    pub position: Point2,
    /// Width and height. Never negative for rectangles built by this crate.
    pub size: Vector2,
}

impl Default for Rect {
    fn default() -> Self {
        Self {
            position: Point2::origin(),
            size: Vector2::zeros(),
        }
    }
}

impl Rect {
    /// Creates a rectangle from its minimum corner and size.
    #[must_use]
    pub fn new(position: Point2, size: Vector2) -> Self {
        Self { position, size }
    }

    /// Creates the smallest rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        let min = Point2::new(a.x.min(b.x), a.y.min(b.y));
        let max = Point2::new(a.x.max(b.x), a.y.max(b.y));
        Self::new(min, max - min)
    }

    /// Creates the bounding rectangle of a point set, or `None` if it is empty.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        extents_2d(points).map(|(min, max)| Self::new(min, max - min))
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        self.position
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        self.position + self.size
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        self.position + self.size * 0.5
    }

    /// The four corners, clockwise from the top-left in y-down coordinates.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        let min = self.min();
        let max = self.max();
        [
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ]
    }

    /// Returns `true` if the point lies inside or on the border.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Returns `true` if the rectangles overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }
}
