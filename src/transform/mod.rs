use tracing::trace;

use crate::cache::Cached;
use crate::error::{GeometryError, Result};
use crate::geometry::{Rect, Segment};
use crate::math::{transform_point, Matrix3, Point2, Vector2};

/// The affine placement of a shape in its parent space.
///
/// Maps a local point `p` to `position + R(rotation) * S(scale) * (p - origin)`.
/// Angles are in radians. The forward matrix and its inverse are derived
/// lazily and cached independently; every mutator marks both stale and bumps
/// [`TransformSpace::revision`], which owners watch to learn that the
/// placement changed.
#[derive(Debug, Clone)]
pub struct TransformSpace {
    position: Point2,
    origin: Point2,
    rotation: f64,
    scale: Vector2,
    revision: u64,
    forward: Cached<Matrix3>,
    inverse: Cached<Option<Matrix3>>,
}

impl Default for TransformSpace {
    fn default() -> Self {
        Self::new(Point2::origin(), 0.0, Vector2::new(1.0, 1.0))
    }
}

impl PartialEq for TransformSpace {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.origin == other.origin
            && self.rotation == other.rotation
            && self.scale == other.scale
    }
}

impl TransformSpace {
    /// Creates a transform with the given position, rotation and scale and an
    /// origin at `(0, 0)`.
    #[must_use]
    pub fn new(position: Point2, rotation: f64, scale: Vector2) -> Self {
        Self {
            position,
            origin: Point2::origin(),
            rotation,
            scale,
            revision: 0,
            forward: Cached::new(Matrix3::identity()),
            inverse: Cached::new(None),
        }
    }

    /// Resets to the identity placement.
    pub fn reset(&mut self) {
        self.position = Point2::origin();
        self.origin = Point2::origin();
        self.rotation = 0.0;
        self.scale = Vector2::new(1.0, 1.0);
        self.touch();
    }

    /// Copies the placement of `other`, counting as one mutation.
    pub fn assign(&mut self, other: &TransformSpace) {
        self.position = other.position;
        self.origin = other.origin;
        self.rotation = other.rotation;
        self.scale = other.scale;
        self.touch();
    }

    /// Counter bumped by every mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.forward.invalidate();
        self.inverse.invalidate();
        self.revision = self.revision.wrapping_add(1);
    }

    // --- Position ---

    pub fn set_position(&mut self, position: Point2) {
        self.position = position;
        self.touch();
    }

    pub fn set_position_x(&mut self, x: f64) {
        self.position.x = x;
        self.touch();
    }

    pub fn set_position_y(&mut self, y: f64) {
        self.position.y = y;
        self.touch();
    }

    /// Shifts the position by `shift`.
    pub fn move_by(&mut self, shift: Vector2) {
        self.position += shift;
        self.touch();
    }

    pub fn move_x(&mut self, shift: f64) {
        self.position.x += shift;
        self.touch();
    }

    pub fn move_y(&mut self, shift: f64) {
        self.position.y += shift;
        self.touch();
    }

    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    // --- Rotation ---

    pub fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
        self.touch();
    }

    /// Adds `angle` radians to the current rotation.
    pub fn rotate(&mut self, angle: f64) {
        self.rotation += angle;
        self.touch();
    }

    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    // --- Scale ---

    pub fn set_scale(&mut self, factors: Vector2) {
        self.scale = factors;
        self.touch();
    }

    pub fn set_scale_x(&mut self, factor: f64) {
        self.scale.x = factor;
        self.touch();
    }

    pub fn set_scale_y(&mut self, factor: f64) {
        self.scale.y = factor;
        self.touch();
    }

    /// Multiplies the current scale component-wise by `factors`.
    pub fn scale(&mut self, factors: Vector2) {
        self.scale.component_mul_assign(&factors);
        self.touch();
    }

    pub fn scale_x(&mut self, factor: f64) {
        self.scale.x *= factor;
        self.touch();
    }

    pub fn scale_y(&mut self, factor: f64) {
        self.scale.y *= factor;
        self.touch();
    }

    #[must_use]
    pub fn scale_factor(&self) -> Vector2 {
        self.scale
    }

    // --- Origin ---

    /// Sets the local anchor that rotation and scale pivot around.
    pub fn set_origin(&mut self, origin: Point2) {
        self.origin = origin;
        self.touch();
    }

    #[must_use]
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    // --- Matrices ---

    /// Local-to-global matrix.
    #[must_use]
    pub fn transform(&self) -> Matrix3 {
        self.forward.get_or_update(|| {
            trace!(revision = self.revision, "rebuilding forward transform");
            self.build_forward()
        })
    }

    /// Global-to-local matrix.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularTransform` if a scale component is zero.
    pub fn inverse_transform(&self) -> Result<Matrix3> {
        self.inverse
            .get_or_update(|| {
                trace!(revision = self.revision, "rebuilding inverse transform");
                self.transform().try_inverse()
            })
            .ok_or_else(|| GeometryError::SingularTransform.into())
    }

    fn build_forward(&self) -> Matrix3 {
        let (sin, cos) = self.rotation.sin_cos();
        let sx = self.scale.x;
        let sy = self.scale.y;
        // Linear part R * S, translation chosen so that origin maps to position.
        let a = cos * sx;
        let b = -sin * sy;
        let c = sin * sx;
        let d = cos * sy;
        let tx = self.position.x - (a * self.origin.x + b * self.origin.y);
        let ty = self.position.y - (c * self.origin.x + d * self.origin.y);
        Matrix3::new(a, b, tx, c, d, ty, 0.0, 0.0, 1.0)
    }

    // --- Conversions ---

    /// Converts a local point to global coordinates.
    #[must_use]
    pub fn convert_to_global(&self, point: &Point2) -> Point2 {
        transform_point(&self.transform(), point)
    }

    /// Converts a local segment to global coordinates.
    #[must_use]
    pub fn convert_segment_to_global(&self, segment: &Segment) -> Segment {
        let m = self.transform();
        Segment::new(transform_point(&m, &segment.p1), transform_point(&m, &segment.p2))
    }

    /// Converts a local rectangle to the global axis-aligned box enclosing it.
    #[must_use]
    pub fn convert_rect_to_global(&self, rect: &Rect) -> Rect {
        map_rect(&self.transform(), rect)
    }

    /// Converts a global point to local coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularTransform` if the transform has no inverse.
    pub fn convert_to_local(&self, point: &Point2) -> Result<Point2> {
        Ok(transform_point(&self.inverse_transform()?, point))
    }

    /// Converts a global segment to local coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularTransform` if the transform has no inverse.
    pub fn convert_segment_to_local(&self, segment: &Segment) -> Result<Segment> {
        let m = self.inverse_transform()?;
        Ok(Segment::new(
            transform_point(&m, &segment.p1),
            transform_point(&m, &segment.p2),
        ))
    }

    /// Converts a global rectangle to the local axis-aligned box enclosing it.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::SingularTransform` if the transform has no inverse.
    pub fn convert_rect_to_local(&self, rect: &Rect) -> Result<Rect> {
        Ok(map_rect(&self.inverse_transform()?, rect))
    }
}

/// Maps the four corners and takes their extents, since rotation can change
/// which corners end up extremal.
fn map_rect(matrix: &Matrix3, rect: &Rect) -> Rect {
    let corners = rect.corners().map(|c| transform_point(matrix, &c));
    Rect::from_points(&corners).unwrap_or(*rect)
}
