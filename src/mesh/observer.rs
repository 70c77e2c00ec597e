use std::fmt;

use super::id::{EdgeId, FaceId, VertexId};
use super::Mesh;

/// A change announced to mesh observers.
///
/// Events fire after the change is applied, so handlers see the
/// post-mutation mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshEvent {
    VertexAdded(VertexId),
    EdgeAdded(EdgeId),
    FaceAdded(FaceId),
    VertexRemoved(VertexId),
    EdgeRemoved(EdgeId),
    FaceRemoved(FaceId),
    VertexMoved(VertexId),
    TransformUpdated,
    /// Fired once before a mesh tears down all of its elements.
    Erasing,
}

type Handler<T> = Box<dyn FnMut(&Mesh, T)>;
type SignalHandler = Box<dyn FnMut(&Mesh)>;

/// A set of optional event handlers registered on a [`Mesh`].
///
/// Only the handlers that are set get called, so a subscriber interested in a
/// single event kind provides a single closure. The catch-all set with
/// [`MeshObserver::on_any`] runs after the typed handler.
#[derive(Default)]
pub struct MeshObserver {
    vertex_added: Option<Handler<VertexId>>,
    edge_added: Option<Handler<EdgeId>>,
    face_added: Option<Handler<FaceId>>,
    vertex_removed: Option<Handler<VertexId>>,
    edge_removed: Option<Handler<EdgeId>>,
    face_removed: Option<Handler<FaceId>>,
    vertex_moved: Option<Handler<VertexId>>,
    transform_updated: Option<SignalHandler>,
    erasing: Option<SignalHandler>,
    any: Option<Handler<MeshEvent>>,
}

impl MeshObserver {
    /// Creates an observer with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_vertex_added(mut self, f: impl FnMut(&Mesh, VertexId) + 'static) -> Self {
        self.vertex_added = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_edge_added(mut self, f: impl FnMut(&Mesh, EdgeId) + 'static) -> Self {
        self.edge_added = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_face_added(mut self, f: impl FnMut(&Mesh, FaceId) + 'static) -> Self {
        self.face_added = Some(Box::new(f));
        self
    }

    /// The handler receives the id of the removed vertex, which no longer resolves.
    #[must_use]
    pub fn on_vertex_removed(mut self, f: impl FnMut(&Mesh, VertexId) + 'static) -> Self {
        self.vertex_removed = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_edge_removed(mut self, f: impl FnMut(&Mesh, EdgeId) + 'static) -> Self {
        self.edge_removed = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_face_removed(mut self, f: impl FnMut(&Mesh, FaceId) + 'static) -> Self {
        self.face_removed = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_vertex_moved(mut self, f: impl FnMut(&Mesh, VertexId) + 'static) -> Self {
        self.vertex_moved = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_transform_updated(mut self, f: impl FnMut(&Mesh) + 'static) -> Self {
        self.transform_updated = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_erasing(mut self, f: impl FnMut(&Mesh) + 'static) -> Self {
        self.erasing = Some(Box::new(f));
        self
    }

    /// Handler called for every event, after the kind-specific one.
    #[must_use]
    pub fn on_any(mut self, f: impl FnMut(&Mesh, MeshEvent) + 'static) -> Self {
        self.any = Some(Box::new(f));
        self
    }

    /// Routes `event` to the matching handlers.
    pub fn dispatch(&mut self, mesh: &Mesh, event: MeshEvent) {
        match event {
            MeshEvent::VertexAdded(id) => call(&mut self.vertex_added, mesh, id),
            MeshEvent::EdgeAdded(id) => call(&mut self.edge_added, mesh, id),
            MeshEvent::FaceAdded(id) => call(&mut self.face_added, mesh, id),
            MeshEvent::VertexRemoved(id) => call(&mut self.vertex_removed, mesh, id),
            MeshEvent::EdgeRemoved(id) => call(&mut self.edge_removed, mesh, id),
            MeshEvent::FaceRemoved(id) => call(&mut self.face_removed, mesh, id),
            MeshEvent::VertexMoved(id) => call(&mut self.vertex_moved, mesh, id),
            MeshEvent::TransformUpdated => {
                if let Some(f) = self.transform_updated.as_mut() {
                    f(mesh);
                }
            }
            MeshEvent::Erasing => {
                if let Some(f) = self.erasing.as_mut() {
                    f(mesh);
                }
            }
        }
        call(&mut self.any, mesh, event);
    }
}

fn call<T>(handler: &mut Option<Handler<T>>, mesh: &Mesh, arg: T) {
    if let Some(f) = handler.as_mut() {
        f(mesh, arg);
    }
}

impl fmt::Debug for MeshObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshObserver")
            .field("vertex_added", &self.vertex_added.is_some())
            .field("edge_added", &self.edge_added.is_some())
            .field("face_added", &self.face_added.is_some())
            .field("vertex_removed", &self.vertex_removed.is_some())
            .field("edge_removed", &self.edge_removed.is_some())
            .field("face_removed", &self.face_removed.is_some())
            .field("vertex_moved", &self.vertex_moved.is_some())
            .field("transform_updated", &self.transform_updated.is_some())
            .field("erasing", &self.erasing.is_some())
            .field("any", &self.any.is_some())
            .finish()
    }
}
