mod bounds;
mod elements;
mod id;
mod merge;
mod observer;
mod query;
mod shapes;

pub use elements::{EdgeData, FaceData, VertexData};
pub use id::{EdgeId, EdgeKey, ElementId, FaceId, FaceKey, MeshTag, ObserverId, VertexId, VertexKey};
pub use observer::{MeshEvent, MeshObserver};
pub use query::Intersection;
pub use shapes::{PolygonParams, StarParams};

use std::ops::{Deref, DerefMut};

use slotmap::SlotMap;
use tracing::debug;

use crate::cache::Cached;
use crate::error::{Result, TopologyError};
use crate::geometry::{Rect, Segment, Triangle};
use crate::math::{Point2, Vector2};
use crate::transform::TransformSpace;

/// A 2D mesh of vertices, edges and triangular faces in a local space placed
/// by a [`TransformSpace`].
///
/// The mesh exclusively owns its elements, stored in generational arenas;
/// edges and faces refer to vertices by [`VertexId`]. Creation order is kept
/// per element kind and drives iteration and index lookup.
///
/// Every mutation is announced synchronously to the registered
/// [`MeshObserver`]s and invalidates the bounds caches it affects.
#[derive(Debug)]
pub struct Mesh {
    tag: MeshTag,
    transform: TransformSpace,
    vertices: SlotMap<VertexKey, VertexData>,
    edges: SlotMap<EdgeKey, EdgeData>,
    faces: SlotMap<FaceKey, FaceData>,
    vertex_order: Vec<VertexKey>,
    edge_order: Vec<EdgeKey>,
    face_order: Vec<FaceKey>,
    observers: SlotMap<ObserverId, MeshObserver>,
    /// Size of the registry while it is detached for delivery.
    detached_observers: usize,
    local_bounds: Cached<Rect>,
    global_bounds: Cached<Rect>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        self.notify(MeshEvent::Erasing);
    }
}

impl Mesh {
    /// Creates a new, empty mesh with an identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tag: MeshTag::next(),
            transform: TransformSpace::default(),
            vertices: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            faces: SlotMap::with_key(),
            vertex_order: Vec::new(),
            edge_order: Vec::new(),
            face_order: Vec::new(),
            observers: SlotMap::with_key(),
            detached_observers: 0,
            local_bounds: Cached::default(),
            global_bounds: Cached::default(),
        }
    }

    /// Identity of this mesh; every element handle carries it.
    #[must_use]
    pub fn tag(&self) -> MeshTag {
        self.tag
    }

    // --- Observers ---

    /// Registers an observer and returns the handle to remove it with.
    pub fn add_observer(&mut self, observer: MeshObserver) -> ObserverId {
        self.observers.insert(observer)
    }

    /// Deregisters an observer, handing it back.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the handle is not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> Result<MeshObserver> {
        self.observers
            .remove(id)
            .ok_or_else(|| TopologyError::EntityNotFound("observer".into()).into())
    }

    /// Number of registered observers, including while they are being notified.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len() + self.detached_observers
    }

    /// Delivers `event` to every observer. The registry is detached during
    /// delivery so handlers can read the whole mesh.
    fn notify(&mut self, event: MeshEvent) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        self.detached_observers = observers.len();
        for observer in observers.values_mut() {
            observer.dispatch(self, event);
        }
        self.detached_observers = 0;
        self.observers = observers;
    }

    fn invalidate_bounds(&self) {
        self.local_bounds.invalidate();
        self.global_bounds.invalidate();
    }

    // --- Transform ---

    /// The mesh's placement in its parent space.
    #[must_use]
    pub fn transform(&self) -> &TransformSpace {
        &self.transform
    }

    /// Mutable access to the placement.
    ///
    /// When the returned guard drops after any transform mutation (including
    /// assigning a whole new [`TransformSpace`] through it), the global bounds
    /// are invalidated and [`MeshEvent::TransformUpdated`] fires once.
    pub fn transform_mut(&mut self) -> TransformGuard<'_> {
        let before = self.transform.clone();
        TransformGuard { mesh: self, before }
    }

    fn on_transform_updated(&mut self) {
        self.global_bounds.invalidate();
        self.notify(MeshEvent::TransformUpdated);
    }

    // --- Element creation ---

    /// Adds a vertex at `coords` (local space) and returns its id.
    pub fn add_vertex(&mut self, coords: Point2) -> VertexId {
        let key = self.vertices.insert(VertexData::new(coords));
        self.vertex_order.push(key);
        self.invalidate_bounds();
        let id = VertexId::new(self.tag, key);
        self.notify(MeshEvent::VertexAdded(id));
        id
    }

    /// Adds an edge (liaison) between two vertices of this mesh.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotOwned` if either vertex does not belong to
    /// this mesh. Nothing is added in that case.
    pub fn add_edge(&mut self, start: VertexId, end: VertexId) -> Result<EdgeId> {
        self.ensure_owned(start)?;
        self.ensure_owned(end)?;
        Ok(self.push_edge(start, end))
    }

    /// Adds a triangular face over three vertices of this mesh.
    ///
    /// Collinear corners are accepted; such a face never contains a point.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::NotOwned` if any vertex does not belong to
    /// this mesh. Nothing is added in that case.
    pub fn add_face(&mut self, v1: VertexId, v2: VertexId, v3: VertexId) -> Result<FaceId> {
        self.ensure_owned(v1)?;
        self.ensure_owned(v2)?;
        self.ensure_owned(v3)?;
        Ok(self.push_face([v1, v2, v3]))
    }

    fn ensure_owned(&self, id: VertexId) -> Result<()> {
        if self.resolve_vertex(id).is_none() {
            return Err(TopologyError::NotOwned(format!("vertex {id}")).into());
        }
        Ok(())
    }

    /// Inserts an edge whose endpoints are known to be owned.
    fn push_edge(&mut self, start: VertexId, end: VertexId) -> EdgeId {
        let key = self.edges.insert(EdgeData { start, end });
        self.edge_order.push(key);
        let id = EdgeId::new(self.tag, key);
        self.notify(MeshEvent::EdgeAdded(id));
        id
    }

    /// Inserts a face whose corners are known to be owned.
    fn push_face(&mut self, vertices: [VertexId; 3]) -> FaceId {
        let key = self.faces.insert(FaceData { vertices });
        self.face_order.push(key);
        let id = FaceId::new(self.tag, key);
        self.notify(MeshEvent::FaceAdded(id));
        id
    }

    // --- Element removal ---

    /// Removes a vertex together with every edge and face that references it.
    ///
    /// Dependent faces are removed first, then dependent edges, each with its
    /// own removal event; the vertex's removal event fires last.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the vertex is not in this
    /// mesh. Nothing is removed in that case.
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<()> {
        if self.resolve_vertex(id).is_none() {
            return Err(not_found("vertex", id));
        }

        let dependent_faces: Vec<FaceKey> = self
            .face_order
            .iter()
            .copied()
            .filter(|&key| self.faces[key].references(id))
            .collect();
        let dependent_edges: Vec<EdgeKey> = self
            .edge_order
            .iter()
            .copied()
            .filter(|&key| self.edges[key].references(id))
            .collect();
        if !dependent_faces.is_empty() || !dependent_edges.is_empty() {
            debug!(
                vertex = %id,
                faces = dependent_faces.len(),
                edges = dependent_edges.len(),
                "cascading vertex removal"
            );
        }

        for key in dependent_faces {
            self.detach_face(key);
        }
        for key in dependent_edges {
            self.detach_edge(key);
        }
        self.vertices.remove(id.key());
        self.vertex_order.retain(|&k| k != id.key());
        self.invalidate_bounds();
        self.notify(MeshEvent::VertexRemoved(id));
        Ok(())
    }

    /// Removes a single edge; its endpoints stay.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the edge is not in this mesh.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<()> {
        if id.mesh() != self.tag || !self.edges.contains_key(id.key()) {
            return Err(not_found("edge", id));
        }
        self.detach_edge(id.key());
        Ok(())
    }

    /// Removes a single face; its corners stay.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the face is not in this mesh.
    pub fn remove_face(&mut self, id: FaceId) -> Result<()> {
        if id.mesh() != self.tag || !self.faces.contains_key(id.key()) {
            return Err(not_found("face", id));
        }
        self.detach_face(id.key());
        Ok(())
    }

    fn detach_edge(&mut self, key: EdgeKey) {
        self.edges.remove(key);
        self.edge_order.retain(|&k| k != key);
        self.notify(MeshEvent::EdgeRemoved(EdgeId::new(self.tag, key)));
    }

    fn detach_face(&mut self, key: FaceKey) {
        self.faces.remove(key);
        self.face_order.retain(|&k| k != key);
        self.notify(MeshEvent::FaceRemoved(FaceId::new(self.tag, key)));
    }

    /// Removes every element.
    ///
    /// [`MeshEvent::Erasing`] fires once first, then one removal event per
    /// face, edge and vertex, in that order. Observers stay registered.
    pub fn clear(&mut self) {
        debug!(
            vertices = self.vertices.len(),
            edges = self.edges.len(),
            faces = self.faces.len(),
            "clearing mesh"
        );
        self.notify(MeshEvent::Erasing);

        for key in std::mem::take(&mut self.face_order) {
            self.faces.remove(key);
            self.notify(MeshEvent::FaceRemoved(FaceId::new(self.tag, key)));
        }
        for key in std::mem::take(&mut self.edge_order) {
            self.edges.remove(key);
            self.notify(MeshEvent::EdgeRemoved(EdgeId::new(self.tag, key)));
        }
        for key in std::mem::take(&mut self.vertex_order) {
            self.vertices.remove(key);
            self.invalidate_bounds();
            self.notify(MeshEvent::VertexRemoved(VertexId::new(self.tag, key)));
        }
        self.invalidate_bounds();
    }

    // --- Vertex motion ---

    /// Moves a vertex by `delta` in local space. Its id is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the vertex is not in this mesh.
    pub fn move_vertex(&mut self, id: VertexId, delta: Vector2) -> Result<()> {
        let point = self.vertex(id)?.point + delta;
        self.set_vertex_position(id, point)
    }

    /// Places a vertex at `coords` in local space. Its id is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the vertex is not in this mesh.
    pub fn set_vertex_position(&mut self, id: VertexId, coords: Point2) -> Result<()> {
        if id.mesh() != self.tag {
            return Err(not_found("vertex", id));
        }
        let vertex = self
            .vertices
            .get_mut(id.key())
            .ok_or_else(|| not_found("vertex", id))?;
        vertex.point = coords;
        self.invalidate_bounds();
        self.notify(MeshEvent::VertexMoved(id));
        Ok(())
    }

    // --- Lookup ---

    fn resolve_vertex(&self, id: VertexId) -> Option<&VertexData> {
        if id.mesh() != self.tag {
            return None;
        }
        self.vertices.get(id.key())
    }

    /// Returns the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the vertex is not in this mesh.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData> {
        self.resolve_vertex(id).ok_or_else(|| not_found("vertex", id))
    }

    /// Returns the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the edge is not in this mesh.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData> {
        if id.mesh() != self.tag {
            return Err(not_found("edge", id));
        }
        self.edges.get(id.key()).ok_or_else(|| not_found("edge", id))
    }

    /// Returns the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the face is not in this mesh.
    pub fn face(&self, id: FaceId) -> Result<&FaceData> {
        if id.mesh() != self.tag {
            return Err(not_found("face", id));
        }
        self.faces.get(id.key()).ok_or_else(|| not_found("face", id))
    }

    /// Returns `true` if `id` is a vertex of this mesh.
    #[must_use]
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.resolve_vertex(id).is_some()
    }

    /// Returns the `index`-th vertex in creation order.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::IndexOutOfRange` if `index >= vertex_count()`.
    pub fn vertex_at(&self, index: usize) -> Result<VertexId> {
        lookup_index("vertex", &self.vertex_order, index).map(|key| VertexId::new(self.tag, key))
    }

    /// Returns the `index`-th edge in creation order.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::IndexOutOfRange` if `index >= edge_count()`.
    pub fn edge_at(&self, index: usize) -> Result<EdgeId> {
        lookup_index("edge", &self.edge_order, index).map(|key| EdgeId::new(self.tag, key))
    }

    /// Returns the `index`-th face in creation order.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::IndexOutOfRange` if `index >= face_count()`.
    pub fn face_at(&self, index: usize) -> Result<FaceId> {
        lookup_index("face", &self.face_order, index).map(|key| FaceId::new(self.tag, key))
    }

    /// Vertex ids in creation order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex_order.iter().map(|&key| VertexId::new(self.tag, key))
    }

    /// Edge ids in creation order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edge_order.iter().map(|&key| EdgeId::new(self.tag, key))
    }

    /// Face ids in creation order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.face_order.iter().map(|&key| FaceId::new(self.tag, key))
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if the mesh has no vertices (and hence no edges or faces).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    // --- Derived geometry ---

    /// The local-space segment of an edge, from its endpoints' current positions.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the edge is not in this mesh.
    pub fn edge_segment(&self, id: EdgeId) -> Result<Segment> {
        let edge = self.edge(id)?;
        Ok(self.segment_of(edge))
    }

    /// The local-space triangle of a face, from its corners' current positions.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the face is not in this mesh.
    pub fn face_triangle(&self, id: FaceId) -> Result<Triangle> {
        let face = self.face(id)?;
        Ok(self.triangle_of(face))
    }

    fn point_of(&self, id: VertexId) -> Point2 {
        self.vertices[id.key()].point
    }

    fn segment_of(&self, edge: &EdgeData) -> Segment {
        Segment::new(self.point_of(edge.start), self.point_of(edge.end))
    }

    fn triangle_of(&self, face: &FaceData) -> Triangle {
        let [a, b, c] = face.vertices;
        Triangle::new(self.point_of(a), self.point_of(b), self.point_of(c))
    }
}

fn not_found<K: slotmap::Key>(kind: &str, id: ElementId<K>) -> crate::error::PlanarError {
    TopologyError::EntityNotFound(format!("{kind} {id}")).into()
}

fn lookup_index<K: Copy>(kind: &'static str, order: &[K], index: usize) -> Result<K> {
    order.get(index).copied().ok_or_else(|| {
        TopologyError::IndexOutOfRange {
            kind,
            index,
            len: order.len(),
        }
        .into()
    })
}

/// Mutable view of a mesh's [`TransformSpace`].
///
/// Dropping the guard after a mutation invalidates the mesh's global bounds
/// and fires [`MeshEvent::TransformUpdated`].
pub struct TransformGuard<'a> {
    mesh: &'a mut Mesh,
    before: TransformSpace,
}

impl Deref for TransformGuard<'_> {
    type Target = TransformSpace;

    fn deref(&self) -> &TransformSpace {
        &self.mesh.transform
    }
}

impl DerefMut for TransformGuard<'_> {
    fn deref_mut(&mut self) -> &mut TransformSpace {
        &mut self.mesh.transform
    }
}

impl Drop for TransformGuard<'_> {
    fn drop(&mut self) {
        // A replaced value can carry any revision, so the placement is compared too.
        let current = &self.mesh.transform;
        if current.revision() != self.before.revision() || *current != self.before {
            self.mesh.on_transform_updated();
        }
    }
}
