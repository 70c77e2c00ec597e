use super::{cross_2d, Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise (y-up), negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Signed area of the triangle `(a, b, c)`.
#[must_use]
pub fn triangle_signed_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    cross_2d(&(b - a), &(c - a)) * 0.5
}

/// Returns `true` if the triangle has (numerically) zero area.
///
/// The threshold is relative to the squared length of the longest side so that
/// both tiny and huge triangles are judged by their shape.
#[must_use]
pub fn is_degenerate_triangle(a: &Point2, b: &Point2, c: &Point2) -> bool {
    let longest = longest_side_squared(a, b, c);
    if longest < TOLERANCE * TOLERANCE {
        return true;
    }
    triangle_signed_area(a, b, c).abs() <= TOLERANCE * longest
}

fn longest_side_squared(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b - a)
        .norm_squared()
        .max((c - b).norm_squared())
        .max((a - c).norm_squared())
}

/// Point-in-triangle test with an inclusive boundary.
///
/// The three edge cross products must not have opposite signs, which works
/// for either winding. The boundary band scales with the squared longest
/// side, like the degeneracy test. Degenerate triangles never contain anything.
#[must_use]
pub fn point_in_triangle_2d(point: &Point2, a: &Point2, b: &Point2, c: &Point2) -> bool {
    if is_degenerate_triangle(a, b, c) {
        return false;
    }
    let d1 = cross_2d(&(b - a), &(point - a));
    let d2 = cross_2d(&(c - b), &(point - b));
    let d3 = cross_2d(&(a - c), &(point - c));

    let eps = TOLERANCE * longest_side_squared(a, b, c);
    let has_neg = d1 < -eps || d2 < -eps || d3 < -eps;
    let has_pos = d1 > eps || d2 > eps || d3 > eps;
    !(has_neg && has_pos)
}

/// Axis-aligned extents `(min, max)` of a point set, or `None` if empty.
#[must_use]
pub fn extents_2d<'a, I>(points: I) -> Option<(Point2, Point2)>
where
    I: IntoIterator<Item = &'a Point2>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let (mut min, mut max) = (first, first);
    for pt in iter {
        min.x = min.x.min(pt.x);
        min.y = min.y.min(pt.y);
        max.x = max.x.max(pt.x);
        max.y = max.y.max(pt.y);
    }
    Some((min, max))
}
