use crate::geometry::Segment;
use crate::math::Point2;

use super::id::{EdgeId, FaceId};
use super::Mesh;

/// A crossing between an edge of one mesh and an edge of another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Crossing point in global space.
    pub point: Point2,
    /// The edge of the mesh the query was made on.
    pub edge: EdgeId,
    /// The edge of the other mesh.
    pub other_edge: EdgeId,
}

impl Mesh {
    /// Every edge as a global-space segment, in creation order.
    fn global_segments(&self) -> Vec<(EdgeId, Segment)> {
        self.edge_order
            .iter()
            .map(|&key| {
                let local = self.segment_of(&self.edges[key]);
                (
                    EdgeId::new(self.tag, key),
                    self.transform.convert_segment_to_global(&local),
                )
            })
            .collect()
    }

    /// Returns `true` if any edge of this mesh crosses or touches any edge of
    /// `other`, both taken in global space.
    ///
    /// Stops at the first crossing found. Parallel and collinear edges never
    /// count as crossing.
    #[must_use]
    pub fn intersects(&self, other: &Mesh) -> bool {
        if self.edge_order.is_empty() {
            return false;
        }
        let theirs = other.global_segments();
        self.edge_order.iter().any(|&key| {
            let mine = self
                .transform
                .convert_segment_to_global(&self.segment_of(&self.edges[key]));
            theirs.iter().any(|(_, segment)| mine.intersects(segment))
        })
    }

    /// All edge crossings between this mesh and `other`, in global space.
    ///
    /// Ordered by this mesh's edges (outer) then the other's (inner). Crossings
    /// that share a point through several edge pairs are all reported.
    #[must_use]
    pub fn intersections(&self, other: &Mesh) -> Vec<Intersection> {
        let theirs = other.global_segments();
        let mut found = Vec::new();
        for (edge, mine) in self.global_segments() {
            for (other_edge, segment) in &theirs {
                if let Some(point) = mine.intersection(segment) {
                    found.push(Intersection {
                        point,
                        edge,
                        other_edge: *other_edge,
                    });
                }
            }
        }
        found
    }

    /// Returns `true` if the global point lies inside (or on the border of)
    /// at least one face.
    ///
    /// Degenerate faces never contain a point, and neither does a mesh whose
    /// transform has no inverse.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        let Ok(local) = self.transform.convert_to_local(point) else {
            return false;
        };
        self.face_order
            .iter()
            .any(|&key| self.triangle_of(&self.faces[key]).contains(&local))
    }

    /// Every face containing the global point, in creation order.
    #[must_use]
    pub fn containing_faces(&self, point: &Point2) -> Vec<FaceId> {
        let Ok(local) = self.transform.convert_to_local(point) else {
            return Vec::new();
        };
        self.face_order
            .iter()
            .filter(|&&key| self.triangle_of(&self.faces[key]).contains(&local))
            .map(|&key| FaceId::new(self.tag, key))
            .collect()
    }
}
