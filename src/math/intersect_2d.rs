use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
/// Parallelism is judged on the sine of the angle between the directions, so
/// the test does not depend on the segment lengths.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() <= TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let delta = p2 - p1;
    let t = cross_2d(&delta, d2) / cross;
    let u = cross_2d(&delta, d1) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are in `[0, 1]`.
/// Touching endpoints count as an intersection. Parallel and collinear
/// segments (including overlapping ones) report `None`, as do zero-length
/// segments.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let (t, u) = line_line_intersect_2d(a0, &da, b0, &db)?;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        Some((a0 + da * t_clamped, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Returns `true` if the segments `(a0, a1)` and `(b0, b1)` intersect.
#[must_use]
pub fn segments_intersect_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    segment_segment_intersect_2d(a0, a1, b0, b1).is_some()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let (t, u) = line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.5, -1.0),
            &Vector2::new(0.0, 1.0),
        )
        .unwrap();
        assert_abs_diff_eq!(t, 0.5, epsilon = TOLERANCE);
        assert_abs_diff_eq!(u, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        assert!(line_line_intersect_2d(
            &p(0.0, 0.0),
            &Vector2::new(1.0, 0.0),
            &p(0.0, 1.0),
            &Vector2::new(1.0, 0.0),
        )
        .is_none());
    }

    #[test]
    fn diagonals_cross_at_center() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(10.0, 10.0), &p(0.0, 10.0), &p(10.0, 0.0))
                .unwrap();
        assert_abs_diff_eq!(pt.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pt.y, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t, 0.5, epsilon = TOLERANCE);
        assert_abs_diff_eq!(u, 0.5, epsilon = TOLERANCE);
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!segments_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 0.0),
            &p(0.0, 1.0),
            &p(1.0, 1.0)
        ));
    }

    #[test]
    fn collinear_overlap_is_not_reported() {
        assert!(!segments_intersect_2d(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(3.0, 0.0)
        ));
    }

    #[test]
    fn touching_endpoints_intersect() {
        let (pt, t, u) =
            segment_segment_intersect_2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0))
                .unwrap();
        assert_abs_diff_eq!(pt.x, 1.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(pt.y, 0.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(t, 1.0, epsilon = TOLERANCE);
        assert_abs_diff_eq!(u, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn t_junction_intersects() {
        assert!(segments_intersect_2d(
            &p(0.0, 0.0),
            &p(2.0, 0.0),
            &p(1.0, 0.0),
            &p(1.0, 5.0)
        ));
    }

    #[test]
    fn disjoint_lines_crossing_outside_segments() {
        // The supporting lines cross at (5, 5) but neither segment reaches it.
        assert!(!segments_intersect_2d(
            &p(0.0, 0.0),
            &p(1.0, 1.0),
            &p(0.0, 10.0),
            &p(1.0, 9.0)
        ));
    }

    #[test]
    fn zero_length_segment_never_intersects() {
        assert!(!segments_intersect_2d(
            &p(1.0, 1.0),
            &p(1.0, 1.0),
            &p(0.0, 0.0),
            &p(2.0, 2.0)
        ));
    }
}
