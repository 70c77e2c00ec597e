use std::collections::HashMap;
use std::ops::{Add, AddAssign};

use tracing::debug;

use super::id::{VertexId, VertexKey};
use super::Mesh;

impl Mesh {
    /// Copies every vertex, edge and face of `other` into this mesh under
    /// fresh ids, firing the usual added events. This mesh's own elements
    /// and transform are left as they are.
    ///
    /// Coordinates are copied verbatim: `other`'s local coordinates become
    /// local coordinates of this mesh, and `other`'s transform is ignored.
    pub fn merge(&mut self, other: &Mesh) -> &mut Self {
        debug!(
            vertices = other.vertex_count(),
            edges = other.edge_count(),
            faces = other.face_count(),
            "merging mesh"
        );
        let mut remap: HashMap<VertexKey, VertexId> = HashMap::with_capacity(other.vertex_count());
        for &key in &other.vertex_order {
            let id = self.add_vertex(other.vertices[key].point);
            remap.insert(key, id);
        }
        for &key in &other.edge_order {
            let edge = other.edges[key];
            self.push_edge(remap[&edge.start.key()], remap[&edge.end.key()]);
        }
        for &key in &other.face_order {
            let [a, b, c] = other.faces[key].vertices;
            self.push_face([remap[&a.key()], remap[&b.key()], remap[&c.key()]]);
        }
        self
    }

    /// Replaces this mesh's geometry and placement with a copy of `other`'s.
    ///
    /// Behaves like [`Mesh::clear`] followed by [`Mesh::merge`] and a transform
    /// update; the observers of this mesh stay registered and see every step.
    pub fn replace_with(&mut self, other: &Mesh) {
        self.clear();
        self.merge(other);
        self.transform_mut().assign(other.transform());
    }
}

/// Deep clone: every element is copied under fresh ids scoped to the new
/// mesh, the transform is copied by value, and no observers are carried over.
impl Clone for Mesh {
    fn clone(&self) -> Self {
        let mut copy = Mesh::new();
        copy.transform = self.transform.clone();
        copy.merge(self);
        copy
    }
}

impl AddAssign<&Mesh> for Mesh {
    fn add_assign(&mut self, other: &Mesh) {
        self.merge(other);
    }
}

impl Add<&Mesh> for &Mesh {
    type Output = Mesh;

    fn add(self, other: &Mesh) -> Mesh {
        let mut result = self.clone();
        result.merge(other);
        result
    }
}
