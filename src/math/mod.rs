pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous matrix for 2D affine transforms.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross_2d(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Applies a homogeneous 2D affine matrix to a point.
#[must_use]
pub fn transform_point(matrix: &Matrix3, point: &Point2) -> Point2 {
    let v = matrix * nalgebra::Vector3::new(point.x, point.y, 1.0);
    Point2::new(v.x, v.y)
}
