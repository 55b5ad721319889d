/// Triangle wireframes in raster space
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::math::{Vec2i, Vec3f};
use crate::projection::Projector;

/// Whether every vertex of a triangle fell inside the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Inside,
    Outside,
}

impl From<bool> for Visibility {
    fn from(visible: bool) -> Self {
        if visible {
            Visibility::Inside
        } else {
            Visibility::Outside
        }
    }
}

/// One drawable line segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Vec2i,
    pub to: Vec2i,
    pub visibility: Visibility,
}

/// Edges of a whole render, three per triangle in winding order
#[derive(Debug, Clone, Default)]
pub struct Wireframe {
    pub edges: Vec<Edge>,
    pub triangle_count: usize,
    pub visible_triangles: usize,
}

impl Wireframe {
    pub fn outside_triangles(&self) -> usize {
        self.triangle_count.saturating_sub(self.visible_triangles)
    }
}

fn vertex(vertices: &[Vec3f], index: usize) -> Result<&Vec3f> {
    vertices.get(index).ok_or(Error::IndexOutOfRange {
        index,
        len: vertices.len(),
    })
}

/// Project each triangle and emit its edges `v0-v1`, `v1-v2`, `v2-v0`.
///
/// A triangle is `Inside` only when all three vertices pass the visibility
/// test; there is no partial clipping. Indices past the last whole triangle
/// are ignored.
pub fn render_triangles(
    vertices: &[Vec3f],
    indices: &[usize],
    projector: &Projector,
) -> Result<Wireframe> {
    let dangling = indices.len() % 3;
    if dangling != 0 {
        warn!("ignoring {} trailing indices that do not form a triangle", dangling);
    }

    let mut wireframe = Wireframe {
        edges: Vec::with_capacity(indices.len()),
        ..Default::default()
    };

    for tri in indices.chunks_exact(3) {
        let p0 = projector.project(vertex(vertices, tri[0])?);
        let p1 = projector.project(vertex(vertices, tri[1])?);
        let p2 = projector.project(vertex(vertices, tri[2])?);

        let visible = p0.visible && p1.visible && p2.visible;
        let visibility = Visibility::from(visible);

        wireframe.triangle_count += 1;
        if visible {
            wireframe.visible_triangles += 1;
        }

        for (from, to) in [(p0, p1), (p1, p2), (p2, p0)] {
            wireframe.edges.push(Edge {
                from: from.raster,
                to: to.raster,
                visibility,
            });
        }
    }

    debug!(
        "rendered {} triangles, {} fully inside the canvas",
        wireframe.triangle_count, wireframe.visible_triangles
    );
    Ok(wireframe)
}

/// [`render_triangles`] over a mesh
pub fn render_mesh(mesh: &Mesh, projector: &Projector) -> Result<Wireframe> {
    render_triangles(&mesh.vertices, &mesh.indices, projector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix44;
    use crate::projection::{Camera, ImageSize};

    fn projector() -> Projector {
        Projector::new(&Matrix44::identity(), &Camera::default(), ImageSize::default()).unwrap()
    }

    #[test]
    fn test_edges_follow_winding() {
        let vertices = vec![
            Vec3f::new(0.0, 0.0, -10.0),
            Vec3f::new(1.0, 0.0, -10.0),
            Vec3f::new(0.0, 1.0, -10.0),
        ];
        let p = projector();
        let wireframe = render_triangles(&vertices, &[0, 1, 2], &p).unwrap();
        let r: Vec<Vec2i> = vertices.iter().map(|v| p.project(v).raster).collect();

        assert_eq!(wireframe.edges.len(), 3);
        assert_eq!((wireframe.edges[0].from, wireframe.edges[0].to), (r[0], r[1]));
        assert_eq!((wireframe.edges[1].from, wireframe.edges[1].to), (r[1], r[2]));
        assert_eq!((wireframe.edges[2].from, wireframe.edges[2].to), (r[2], r[0]));
        assert!(wireframe
            .edges
            .iter()
            .all(|e| e.visibility == Visibility::Inside));
        assert_eq!(wireframe.visible_triangles, 1);
    }

    #[test]
    fn test_one_vertex_outside_marks_triangle() {
        let vertices = vec![
            Vec3f::new(0.0, 0.0, -10.0),
            Vec3f::new(1.0, 0.0, -10.0),
            Vec3f::new(100.0, 0.0, -10.0),
        ];
        let wireframe = render_triangles(&vertices, &[0, 1, 2], &projector()).unwrap();
        assert!(wireframe
            .edges
            .iter()
            .all(|e| e.visibility == Visibility::Outside));
        assert_eq!(wireframe.outside_triangles(), 1);
    }

    #[test]
    fn test_trailing_indices_ignored() {
        let vertices = vec![Vec3f::new(0.0, 0.0, -10.0); 3];
        let wireframe = render_triangles(&vertices, &[0, 1, 2, 0], &projector()).unwrap();
        assert_eq!(wireframe.triangle_count, 1);
        assert_eq!(wireframe.edges.len(), 3);
    }

    #[test]
    fn test_bad_index_is_an_error() {
        let vertices = vec![Vec3f::new(0.0, 0.0, -10.0); 2];
        let result = render_triangles(&vertices, &[0, 1, 2], &projector());
        assert!(matches!(
            result,
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
    }

    #[test]
    fn test_cube_in_front_of_camera() {
        let mut mesh = Mesh::cube(2.0);
        for v in &mut mesh.vertices {
            v.z -= 20.0;
        }
        let wireframe = render_mesh(&mesh, &projector()).unwrap();
        assert_eq!(wireframe.triangle_count, 12);
        assert_eq!(wireframe.edges.len(), 36);
        assert_eq!(wireframe.visible_triangles, 12);
    }

    #[test]
    fn test_outside_count_on_hand_built_wireframe() {
        let wireframe = Wireframe {
            edges: Vec::new(),
            triangle_count: 1,
            visible_triangles: 3,
        };
        assert_eq!(wireframe.outside_triangles(), 0);
    }
}
