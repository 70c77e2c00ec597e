use crate::math::Point2;

use super::id::VertexId;

/// Data associated with a mesh vertex (point).
#[derive(Debug, Clone, PartialEq)]
pub struct VertexData {
    /// Position in the mesh's local space.
    pub point: Point2,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point2) -> Self {
        Self { point }
    }
}

/// Data associated with a mesh edge (liaison).
///
/// Only the endpoints are stored; the segment is derived from their current
/// positions on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
}

impl EdgeData {
    /// Returns `true` if either endpoint is `vertex`.
    #[must_use]
    pub fn references(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }
}

/// Data associated with a triangular mesh face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceData {
    /// The three corners, in winding order.
    pub vertices: [VertexId; 3],
}

impl FaceData {
    /// Returns `true` if `vertex` is one of the corners.
    #[must_use]
    pub fn references(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }
}
