/// Pinhole Core Library - Pinhole camera projection pipeline
///
/// Builds camera-to-world matrices from Blender style camera poses, projects
/// world points through camera, screen and NDC space to raster pixels, and
/// turns indexed triangle meshes into visibility tagged wireframe edges.

pub mod error;
pub mod geometry;
pub mod math;
pub mod obj;
pub mod projection;
pub mod scene;
pub mod transform;
pub mod vertex_list;
pub mod wireframe;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::Mesh;
pub use math::{Matrix44, Vec2, Vec2f, Vec2i, Vec3, Vec3f};
pub use projection::{project, Camera, CanvasBounds, ImageSize, Projection, Projector};
pub use scene::load_scene;
pub use transform::{build_camera_to_world, Pose, RotationState, Transform};
pub use wireframe::{render_mesh, render_triangles, Edge, Visibility, Wireframe};
