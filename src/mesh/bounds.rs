use tracing::trace;

use crate::geometry::Rect;

use super::Mesh;

impl Mesh {
    /// Axis-aligned box around all vertices, in local space.
    ///
    /// An empty mesh reports `Rect::default()` (zero size at the origin).
    /// Cached until a vertex is added, removed or moved.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        self.local_bounds.get_or_update(|| {
            trace!(vertices = self.vertices.len(), "recomputing local bounds");
            Rect::from_points(self.vertices.values().map(|v| &v.point)).unwrap_or_default()
        })
    }

    /// The local bounds mapped through the transform, as the axis-aligned
    /// box around the four transformed corners.
    ///
    /// An empty mesh reports `Rect::default()`, like [`Mesh::local_bounds`].
    /// Cached until a vertex changes or the transform is mutated.
    #[must_use]
    pub fn global_bounds(&self) -> Rect {
        self.global_bounds.get_or_update(|| {
            trace!("recomputing global bounds");
            if self.vertices.is_empty() {
                return Rect::default();
            }
            self.transform.convert_rect_to_global(&self.local_bounds())
        })
    }
}
