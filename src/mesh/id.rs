use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::Key;

slotmap::new_key_type! {
    /// Arena key of a vertex inside its mesh.
    pub struct VertexKey;
    /// Arena key of an edge inside its mesh.
    pub struct EdgeKey;
    /// Arena key of a face inside its mesh.
    pub struct FaceKey;
    /// Handle returned when registering an observer.
    pub struct ObserverId;
}

/// Identity of a mesh, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshTag(u64);

impl MeshTag {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a mesh element: the owning mesh's tag plus a generational arena key.
///
/// Handles are never reused: a removed slot comes back with a new generation,
/// and handles from another mesh (including a deep clone) never resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId<K: Key> {
    mesh: MeshTag,
    key: K,
}

/// Unique identifier for a vertex (point) of a mesh.
pub type VertexId = ElementId<VertexKey>;

/// Unique identifier for an edge (liaison) of a mesh.
pub type EdgeId = ElementId<EdgeKey>;

/// Unique identifier for a triangular face of a mesh.
pub type FaceId = ElementId<FaceKey>;

impl<K: Key> ElementId<K> {
    pub(crate) fn new(mesh: MeshTag, key: K) -> Self {
        Self { mesh, key }
    }

    /// Tag of the mesh that issued this handle.
    #[must_use]
    pub fn mesh(&self) -> MeshTag {
        self.mesh
    }

    pub(crate) fn key(&self) -> K {
        self.key
    }

    /// Stable integer form of the handle, unique within the owning mesh.
    #[must_use]
    pub fn raw(&self) -> u64 {
        self.key.data().as_ffi()
    }
}

impl<K: Key> fmt::Display for ElementId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.raw(), self.mesh.0)
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn tags_are_unique() {
        assert_ne!(MeshTag::next(), MeshTag::next());
    }

    #[test]
    fn removed_slot_gets_a_fresh_handle() {
        let tag = MeshTag::next();
        let mut arena: SlotMap<VertexKey, ()> = SlotMap::with_key();
        let first = VertexId::new(tag, arena.insert(()));
        arena.remove(first.key());
        let second = VertexId::new(tag, arena.insert(()));
        assert_ne!(first, second);
        assert_ne!(first.raw(), second.raw());
    }

    #[test]
    fn same_key_different_mesh_differs() {
        let mut arena: SlotMap<VertexKey, ()> = SlotMap::with_key();
        let key = arena.insert(());
        assert_ne!(
            VertexId::new(MeshTag::next(), key),
            VertexId::new(MeshTag::next(), key)
        );
    }
}
