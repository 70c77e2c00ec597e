use std::f64::consts::TAU;

use tracing::debug;

use crate::geometry::Rect;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::{Point2, Vector2};

use super::id::VertexId;
use super::Mesh;

/// Parameters for a regular polygon centered on the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonParams {
    /// Distance from the center to every vertex.
    pub radius: f64,
    /// Number of vertices.
    pub complexity: u32,
}

impl Default for PolygonParams {
    fn default() -> Self {
        Self {
            radius: 20.0,
            complexity: 5,
        }
    }
}

impl PolygonParams {
    #[must_use]
    pub fn new(radius: f64, complexity: u32) -> Self {
        Self { radius, complexity }
    }

    /// Builds the polygon.
    ///
    /// Vertex `k` sits at angle `k * TAU / complexity` from the +x axis.
    /// Boundary edges join consecutive vertices (closing back to the first)
    /// and the faces fan out from vertex 0, one per boundary edge. The two
    /// faces adjacent to vertex 0 collapse to zero area; they are kept so
    /// every boundary edge has a face.
    #[must_use]
    pub fn build(&self) -> Mesh {
        let points = ring(self.complexity as usize, |_| self.radius);
        let mut mesh = Mesh::new();
        let ids = add_points(&mut mesh, &points);
        add_boundary(&mut mesh, &ids);
        for i in 0..ids.len() {
            mesh.push_face([ids[0], ids[i], ids[(i + 1) % ids.len()]]);
        }
        debug!(shape = "polygon", vertices = ids.len(), "built shape");
        mesh
    }
}

/// Parameters for a star centered on the local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarParams {
    /// Radius of the inner (concave) corners.
    pub inner_radius: f64,
    /// Radius of the outer tips.
    pub outer_radius: f64,
    /// Number of tips.
    pub complexity: u32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            inner_radius: 30.0,
            outer_radius: 60.0,
            complexity: 5,
        }
    }
}

impl StarParams {
    #[must_use]
    pub fn new(inner_radius: f64, outer_radius: f64, complexity: u32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            complexity,
        }
    }

    /// Builds the star.
    ///
    /// `2 * complexity` vertices alternate between outer tips (even indices,
    /// the first on the +x axis) and inner corners, joined by boundary edges.
    /// Faces: one spike triangle per tip, plus the inner polygon fanned from
    /// the first inner corner the same way [`PolygonParams::build`] does,
    /// giving `2 * complexity` faces that cover the star exactly.
    #[must_use]
    pub fn build(&self) -> Mesh {
        let count = 2 * self.complexity as usize;
        let points = ring(
            count,
            |k| {
                if k % 2 == 0 {
                    self.outer_radius
                } else {
                    self.inner_radius
                }
            },
        );
        let mut mesh = Mesh::new();
        let ids = add_points(&mut mesh, &points);
        add_boundary(&mut mesh, &ids);

        let n = ids.len();
        for tip in (0..n).step_by(2) {
            mesh.push_face([ids[(tip + n - 1) % n], ids[tip], ids[(tip + 1) % n]]);
        }
        let inner: Vec<VertexId> = ids.iter().copied().skip(1).step_by(2).collect();
        for i in 0..inner.len() {
            mesh.push_face([inner[0], inner[i], inner[(i + 1) % inner.len()]]);
        }
        debug!(shape = "star", vertices = n, "built shape");
        mesh
    }
}

/// `count` points around the origin, evenly spaced by angle, counter-clockwise.
#[allow(clippy::cast_precision_loss)]
fn ring(count: usize, radius: impl Fn(usize) -> f64) -> Vec<Point2> {
    (0..count)
        .map(|k| {
            let angle = TAU * k as f64 / count as f64;
            let r = radius(k);
            Point2::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

fn add_points(mesh: &mut Mesh, points: &[Point2]) -> Vec<VertexId> {
    points.iter().map(|&p| mesh.add_vertex(p)).collect()
}

/// Joins each vertex to the next, closing back to the first.
fn add_boundary(mesh: &mut Mesh, ids: &[VertexId]) {
    for i in 0..ids.len() {
        mesh.push_edge(ids[i], ids[(i + 1) % ids.len()]);
    }
}

/// Fans the outline from its first vertex, flipping corners of clockwise outlines.
fn add_fan(mesh: &mut Mesh, ids: &[VertexId], points: &[Point2]) {
    let flip = signed_area_2d(points) < 0.0;
    for i in 1..ids.len().saturating_sub(1) {
        if flip {
            mesh.push_face([ids[0], ids[i + 1], ids[i]]);
        } else {
            mesh.push_face([ids[0], ids[i], ids[i + 1]]);
        }
    }
}

/// Canonical shape constructors.
///
/// Faces built here always have non-negative signed area: counter-clockwise
/// with y pointing up, which is clockwise on a y-down screen. Caller-supplied
/// vertex lists keep their order; only the face corners are flipped when the
/// outline is clockwise.
impl Mesh {
    /// Two vertices joined by one edge.
    #[must_use]
    pub fn segment(p1: Point2, p2: Point2) -> Mesh {
        Self::polygon(&[p1, p2])
    }

    /// Three vertices, three edges and one face.
    #[must_use]
    pub fn triangle(p1: Point2, p2: Point2, p3: Point2) -> Mesh {
        Self::polygon(&[p1, p2, p3])
    }

    /// Four vertices, four boundary edges and two faces split along the
    /// `p1`-`p3` diagonal.
    #[must_use]
    pub fn quad(p1: Point2, p2: Point2, p3: Point2, p4: Point2) -> Mesh {
        Self::polygon(&[p1, p2, p3, p4])
    }

    /// Rectangle with its minimum corner on the local origin.
    #[must_use]
    pub fn rectangle(size: Vector2) -> Mesh {
        Self::rect(&Rect::new(Point2::origin(), size))
    }

    /// Rectangle covering `rect`, corners ordered as [`Rect::corners`].
    #[must_use]
    pub fn rect(rect: &Rect) -> Mesh {
        let [a, b, c, d] = rect.corners();
        Self::quad(a, b, c, d)
    }

    /// Square of side `length` with its minimum corner on the local origin.
    #[must_use]
    pub fn square(length: f64) -> Mesh {
        Self::rectangle(Vector2::new(length, length))
    }

    /// Circle approximated by a regular polygon of the default complexity.
    #[must_use]
    pub fn circle(radius: f64) -> Mesh {
        PolygonParams {
            radius,
            ..PolygonParams::default()
        }
        .build()
    }

    /// Regular polygon; see [`PolygonParams::build`].
    #[must_use]
    pub fn regular_polygon(radius: f64, complexity: u32) -> Mesh {
        PolygonParams::new(radius, complexity).build()
    }

    /// Star; see [`StarParams::build`].
    #[must_use]
    pub fn star(inner_radius: f64, outer_radius: f64, complexity: u32) -> Mesh {
        StarParams::new(inner_radius, outer_radius, complexity).build()
    }

    /// Arbitrary outline: one vertex per point, boundary edges between
    /// consecutive points (closed for three or more), and `n - 2` faces fanned
    /// from the first point. The fan is only a valid triangulation when every
    /// point is visible from the first one (e.g. convex outlines).
    #[must_use]
    pub fn polygon(points: &[Point2]) -> Mesh {
        let mut mesh = Mesh::new();
        let ids = add_points(&mut mesh, points);
        match ids.len() {
            0 | 1 => {}
            2 => {
                mesh.push_edge(ids[0], ids[1]);
            }
            _ => add_boundary(&mut mesh, &ids),
        }
        add_fan(&mut mesh, &ids, points);
        debug!(shape = "outline", vertices = ids.len(), "built shape");
        mesh
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::polygon_2d::triangle_signed_area;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn face_areas(mesh: &Mesh) -> Vec<f64> {
        mesh.face_ids()
            .map(|id| mesh.face_triangle(id).unwrap().signed_area())
            .collect()
    }

    #[test]
    fn segment_layout() {
        let m = Mesh::segment(p(0.0, 0.0), p(3.0, 4.0));
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (2, 1, 0));
        assert_abs_diff_eq!(m.edge_segment(m.edge_at(0).unwrap()).unwrap().length(), 5.0);
    }

    #[test]
    fn triangle_layout() {
        let m = Mesh::triangle(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (3, 3, 1));
    }

    #[test]
    fn clockwise_triangle_face_is_flipped() {
        let m = Mesh::triangle(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0));
        assert!(face_areas(&m)[0] > 0.0);
        // Vertex order is what the caller gave.
        assert_eq!(m.vertex(m.vertex_at(1).unwrap()).unwrap().point, p(0.0, 1.0));
    }

    #[test]
    fn rectangle_layout() {
        let m = Mesh::rectangle(Vector2::new(10.0, 10.0));
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (4, 4, 2));
        let bounds = m.local_bounds();
        assert_eq!(bounds.min(), p(0.0, 0.0));
        assert_eq!(bounds.max(), p(10.0, 10.0));
        assert!(face_areas(&m).iter().all(|&a| a > 0.0));
        assert_eq!(m.vertex(m.vertex_at(0).unwrap()).unwrap().point, p(0.0, 0.0));
        assert_eq!(m.vertex(m.vertex_at(1).unwrap()).unwrap().point, p(10.0, 0.0));
    }

    #[test]
    fn rect_at_offset() {
        let m = Mesh::rect(&Rect::new(p(-2.0, 3.0), Vector2::new(4.0, 1.0)));
        assert_eq!(m.local_bounds().min(), p(-2.0, 3.0));
        assert!(m.contains(&p(0.0, 3.5)));
        assert!(!m.contains(&p(0.0, 0.0)));
    }

    #[test]
    fn square_layout() {
        let m = Mesh::square(3.0);
        assert_eq!(m.local_bounds().size, Vector2::new(3.0, 3.0));
        assert_eq!(m.face_count(), 2);
    }

    #[test]
    fn circle_default_complexity() {
        let m = Mesh::circle(20.0);
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (5, 5, 5));
        assert!(m.contains(&p(0.0, 0.0)));
        assert!(!m.contains(&p(21.0, 0.0)));
        assert!(m.contains(&p(20.0, 0.0)));
        assert!(face_areas(&m).iter().all(|&a| a >= 0.0));
    }

    #[test]
    fn regular_polygon_layout() {
        let m = Mesh::regular_polygon(20.0, 8);
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (8, 8, 8));
        assert!(m.contains(&p(0.0, 0.0)));
        assert!(m.contains(&p(-19.0, 0.0)));
        assert!(!m.contains(&p(0.0, 20.5)));
        let first = m.vertex(m.vertex_at(0).unwrap()).unwrap().point;
        assert_abs_diff_eq!(first.x, 20.0);
        assert_abs_diff_eq!(first.y, 0.0);
    }

    #[test]
    fn star_layout_and_coverage() {
        let m = Mesh::star(30.0, 60.0, 5);
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (10, 10, 10));
        assert!(m.contains(&p(0.0, 0.0)));
        // Near the first tip, and between two tips outside the inner radius.
        assert!(m.contains(&p(55.0, 0.0)));
        let between = std::f64::consts::TAU / 10.0;
        assert!(!m.contains(&p(45.0 * between.cos(), 45.0 * between.sin())));
        assert!(face_areas(&m).iter().all(|&a| a >= 0.0));
    }

    #[test]
    fn star_default_params() {
        let m = StarParams::default().build();
        assert_eq!(m.vertex_count(), 10);
        assert_abs_diff_eq!(m.local_bounds().max().x, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn outline_fan() {
        let pts = [p(0.0, 0.0), p(4.0, 0.0), p(5.0, 3.0), p(2.0, 5.0), p(-1.0, 3.0)];
        let m = Mesh::polygon(&pts);
        assert_eq!((m.vertex_count(), m.edge_count(), m.face_count()), (5, 5, 3));
        let area: f64 = face_areas(&m).iter().sum();
        assert_abs_diff_eq!(area, signed_area_2d(&pts), epsilon = 1e-9);
    }

    #[test]
    fn clockwise_outline_gets_positive_faces() {
        let pts = [p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)];
        let m = Mesh::polygon(&pts);
        for id in m.face_ids() {
            let [a, b, c] = m.face(id).unwrap().vertices;
            let area = triangle_signed_area(
                &m.vertex(a).unwrap().point,
                &m.vertex(b).unwrap().point,
                &m.vertex(c).unwrap().point,
            );
            assert!(area > 0.0);
        }
    }

    #[test]
    fn degenerate_inputs_build_without_panicking() {
        assert!(Mesh::regular_polygon(10.0, 0).is_empty());
        let single = Mesh::regular_polygon(10.0, 1);
        assert_eq!((single.vertex_count(), single.edge_count(), single.face_count()), (1, 1, 1));
        assert!(!single.contains(&p(10.0, 0.0)));
        assert!(Mesh::polygon(&[]).is_empty());
        assert_eq!(Mesh::polygon(&[p(1.0, 1.0)]).edge_count(), 0);
        assert!(Mesh::star(1.0, 2.0, 0).is_empty());
    }
}
