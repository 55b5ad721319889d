/// Pinhole camera and world-to-raster projection
use serde::Deserialize;

use crate::error::Result;
use crate::math::{Matrix44, Vec2f, Vec2i, Vec3f};

/// Physical camera settings. Lengths of the film back and the focal length are
/// in millimetres, clipping distances in world units.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub focal_length: f32,
    pub film_aperture_width: f32,
    pub film_aperture_height: f32,
    pub near_clipping_plane: f32,
    /// Part of the camera description only; the projection never reads it.
    pub far_clipping_plane: f32,
}

impl Camera {
    pub fn new(
        focal_length: f32,
        film_aperture_width: f32,
        film_aperture_height: f32,
        near_clipping_plane: f32,
        far_clipping_plane: f32,
    ) -> Self {
        Self {
            focal_length,
            film_aperture_width,
            film_aperture_height,
            near_clipping_plane,
            far_clipping_plane,
        }
    }

    /// Canvas boundaries on the near plane
    pub fn canvas(&self) -> CanvasBounds {
        let top = (self.film_aperture_height / 2.0) / self.focal_length * self.near_clipping_plane;
        let right = (self.film_aperture_width / 2.0) / self.focal_length * self.near_clipping_plane;
        CanvasBounds {
            bottom: -top,
            left: -right,
            top,
            right,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(50.0, 35.0, 24.0, 0.1, 100.0)
    }
}

/// Screen-space extent of the canvas, symmetric about the optical axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub bottom: f32,
    pub left: f32,
    pub top: f32,
    pub right: f32,
}

impl CanvasBounds {
    /// Inclusive on every edge
    pub fn contains(&self, screen: &Vec2f) -> bool {
        screen.x >= self.left
            && screen.x <= self.right
            && screen.y >= self.bottom
            && screen.y <= self.top
    }
}

/// Output image dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

/// Every intermediate space a projected point passes through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub camera: Vec3f,
    pub screen: Vec2f,
    pub ndc: Vec2f,
    pub raster: Vec2i,
    pub visible: bool,
}

impl Projection {
    /// False when the point sat in the camera plane (`camera.z == 0`) and
    /// the screen coordinates blew up. The raster value is then a saturated
    /// cast and carries no meaning.
    pub fn is_finite(&self) -> bool {
        self.screen.x.is_finite() && self.screen.y.is_finite()
    }
}

/// Project a world point to raster space.
///
/// `world_to_camera` must already be inverted. The camera looks down its
/// negative Z axis; a point with `camera.z > 0` lies behind it and comes out
/// mirrored through the centre of the image without any clipping, and a point
/// with `camera.z == 0` produces non-finite screen coordinates. Neither case is
/// reported: the raster position is always computed and `visible` only
/// reflects the screen-space bounds test.
pub fn project(
    p_world: &Vec3f,
    world_to_camera: &Matrix44,
    canvas: &CanvasBounds,
    near: f32,
    image: ImageSize,
) -> Projection {
    let p_camera = world_to_camera.mult_vec_matrix(p_world);

    let screen = Vec2f::new(
        p_camera.x / -p_camera.z * near,
        p_camera.y / -p_camera.z * near,
    );

    let ndc = Vec2f::new(
        (screen.x + canvas.right) / (2.0 * canvas.right),
        (screen.y + canvas.top) / (2.0 * canvas.top),
    );

    // raster origin is top-left, so y flips
    let raster = Vec2i::new(
        (ndc.x * image.width as f32).floor() as i32,
        ((1.0 - ndc.y) * image.height as f32).floor() as i32,
    );

    Projection {
        camera: p_camera,
        screen,
        ndc,
        raster,
        visible: canvas.contains(&screen),
    }
}

/// A camera configuration ready to project many points. The world-to-camera
/// matrix is inverted once here and shared by every call to
/// [`Projector::project`].
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    world_to_camera: Matrix44,
    canvas: CanvasBounds,
    near: f32,
    image: ImageSize,
}

impl Projector {
    pub fn new(camera_to_world: &Matrix44, camera: &Camera, image: ImageSize) -> Result<Self> {
        Ok(Self::from_world_to_camera(
            camera_to_world.inverse()?,
            camera,
            image,
        ))
    }

    pub fn from_world_to_camera(world_to_camera: Matrix44, camera: &Camera, image: ImageSize) -> Self {
        Self {
            world_to_camera,
            canvas: camera.canvas(),
            near: camera.near_clipping_plane,
            image,
        }
    }

    pub fn project(&self, p_world: &Vec3f) -> Projection {
        project(
            p_world,
            &self.world_to_camera,
            &self.canvas,
            self.near,
            self.image,
        )
    }

    pub fn canvas(&self) -> &CanvasBounds {
        &self.canvas
    }

    pub fn image(&self) -> ImageSize {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::build_camera_to_world;
    use approx::assert_relative_eq;

    fn origin_projector() -> Projector {
        Projector::new(&Matrix44::identity(), &Camera::default(), ImageSize::default()).unwrap()
    }

    #[test]
    fn test_canvas_bounds() {
        let canvas = Camera::default().canvas();
        assert_relative_eq!(canvas.top, 0.024, epsilon = 1e-7);
        assert_relative_eq!(canvas.right, 0.035, epsilon = 1e-7);
        assert_eq!(canvas.bottom, -canvas.top);
        assert_eq!(canvas.left, -canvas.right);
    }

    #[test]
    fn test_center_projects_to_image_center() {
        let projection = origin_projector().project(&Vec3f::new(0.0, 0.0, -10.0));
        assert_eq!(projection.raster, Vec2i::new(256, 256));
        assert!(projection.visible);
        assert!(projection.is_finite());
    }

    #[test]
    fn test_center_with_rectangular_image() {
        let projector = Projector::new(
            &build_camera_to_world(0.0, 0.0, 0.0, 1.0, 2.0, 3.0),
            &Camera::default(),
            ImageSize::new(640, 480),
        )
        .unwrap();
        let projection = projector.project(&Vec3f::new(1.0, 2.0, -5.0));
        assert_eq!(projection.raster, Vec2i::new(320, 240));
        assert!(projection.visible);
    }

    #[test]
    fn test_outside_is_still_rastered() {
        let projection = origin_projector().project(&Vec3f::new(100.0, 0.0, -10.0));
        assert!(!projection.visible);
        assert!(projection.is_finite());
        assert!(projection.raster.x > 512);
        assert_eq!(projection.raster.y, 256);
    }

    #[test]
    fn test_boundary_is_visible() {
        let canvas = CanvasBounds {
            bottom: -1.0,
            left: -1.0,
            top: 1.0,
            right: 1.0,
        };
        // near 1 and z -1 keep screen coordinates exact
        let on_edge = project(
            &Vec3f::new(1.0, -1.0, -1.0),
            &Matrix44::identity(),
            &canvas,
            1.0,
            ImageSize::default(),
        );
        assert_eq!(on_edge.screen, Vec2f::new(1.0, -1.0));
        assert!(on_edge.visible);
        assert_eq!(on_edge.raster, Vec2i::new(512, 512));

        let past_edge = project(
            &Vec3f::new(1.001, 0.0, -1.0),
            &Matrix44::identity(),
            &canvas,
            1.0,
            ImageSize::default(),
        );
        assert!(!past_edge.visible);
    }

    #[test]
    fn test_y_axis_points_up() {
        let projection = origin_projector().project(&Vec3f::new(0.0, 1.0, -10.0));
        assert!(projection.visible);
        assert!(projection.raster.y < 256);
    }

    #[test]
    fn test_behind_camera_passes_through() {
        let projection = origin_projector().project(&Vec3f::new(1.0, 1.0, 10.0));
        assert_relative_eq!(projection.screen, Vec2f::new(-0.01, -0.01), epsilon = 1e-6);
        assert!(projection.visible);
    }

    #[test]
    fn test_camera_plane_is_not_finite() {
        let projection = origin_projector().project(&Vec3f::new(1.0, 0.0, 0.0));
        assert!(!projection.is_finite());
        assert!(!projection.visible);
    }

    #[test]
    fn test_posed_camera_sees_target() {
        // camera at y = -10 with Z tilted 90 degrees looks along +Y
        let projector = Projector::new(
            &build_camera_to_world(90.0, 0.0, 0.0, 0.0, -10.0, 0.0),
            &Camera::default(),
            ImageSize::default(),
        )
        .unwrap();
        let projection = projector.project(&Vec3f::zeros());
        assert!(projection.visible);
        assert_relative_eq!(projection.camera.z, -10.0, epsilon = 1e-5);
        assert!((projection.raster.x - 256).abs() <= 1);
        assert!((projection.raster.y - 256).abs() <= 1);
    }
}
