/// Camera-to-world matrix construction from rotation angles and a translation
use serde::Deserialize;

use crate::math::{Matrix44, Vec3f};

/// Rotation around the three world axes, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

impl From<[f32; 3]> for RotationState {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Camera placement: rotation in degrees followed by a translation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub rotation: RotationState,
    pub translation: Vec3f,
}

impl Pose {
    pub fn new(rotation: RotationState, translation: Vec3f) -> Self {
        Self {
            rotation,
            translation,
        }
    }
}

/// Degree based trig, evaluated in f64 and narrowed to f32
fn cos_deg(angle: f32) -> f32 {
    f64::from(angle).to_radians().cos() as f32
}

fn sin_deg(angle: f32) -> f32 {
    f64::from(angle).to_radians().sin() as f32
}

/// Transform builder for camera placement
pub struct Transform;

impl Transform {
    pub fn rotation_x(angle: f32) -> Matrix44 {
        let (c, s) = (cos_deg(angle), sin_deg(angle));
        Matrix44::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around Y by the negated angle: looking down the Y axis the X
    /// axis points the opposite way from the other two rotations.
    pub fn rotation_y(angle: f32) -> Matrix44 {
        let (c, s) = (cos_deg(-angle), sin_deg(-angle));
        Matrix44::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(angle: f32) -> Matrix44 {
        let (c, s) = (cos_deg(angle), sin_deg(angle));
        Matrix44::from_rows([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Matrix44 {
        Matrix44::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// `rotX * rotY * rotZ * translation`, one elementary matrix at a time
    pub fn camera_to_world_staged(pose: &Pose) -> Matrix44 {
        let r = pose.rotation;
        let t = pose.translation;
        Self::rotation_x(r.x)
            * Self::rotation_y(r.y)
            * Self::rotation_z(r.z)
            * Self::translation(t.x, t.y, t.z)
    }

    /// Same product as [`Transform::camera_to_world_staged`] expanded into a
    /// single matrix. This is the form the renderer uses.
    pub fn camera_to_world(pose: &Pose) -> Matrix44 {
        let r = pose.rotation;
        let t = pose.translation;
        let (cx, sx) = (cos_deg(r.x), sin_deg(r.x));
        let (cy, sy) = (cos_deg(-r.y), sin_deg(-r.y));
        let (cz, sz) = (cos_deg(r.z), sin_deg(r.z));

        Matrix44::from_rows([
            [cy * cz, cy * sz, sy, 0.0],
            [
                -sx * sy * cz - cx * sz,
                -sx * sy * sz + cx * cz,
                sx * cy,
                0.0,
            ],
            [
                -cx * sy * cz + sx * sz,
                -cx * sy * sz - sx * cz,
                cx * cy,
                0.0,
            ],
            [t.x, t.y, t.z, 1.0],
        ])
    }
}

/// Camera-to-world matrix from three rotation angles (degrees) and a
/// translation
pub fn build_camera_to_world(rx: f32, ry: f32, rz: f32, tx: f32, ty: f32, tz: f32) -> Matrix44 {
    Transform::camera_to_world(&Pose::new(
        RotationState::new(rx, ry, rz),
        Vec3f::new(tx, ty, tz),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Matrix4;

    const POSES: &[[f32; 6]] = &[
        [77.0, 0.0, 5.0, 0.5, -9.0, 3.5],
        [113.0, 30.0, 39.0, 5.3, -10.0, -2.75],
        [67.2, 0.0, -24.0, -3.3, -6.0, 5.0],
        [51.0, 0.0, -135.0, -7.8, 7.5, 10.2],
        [-400.0, 725.5, 90.0, 0.0, 0.0, 0.0],
        [12.5, -48.25, 181.0, 1e3, -1e-3, 42.0],
    ];

    fn pose(p: &[f32; 6]) -> Pose {
        Pose::new(
            RotationState::new(p[0], p[1], p[2]),
            Vec3f::new(p[3], p[4], p[5]),
        )
    }

    #[test]
    fn test_identity_pose() {
        let matrix = build_camera_to_world(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(*matrix.as_matrix(), Matrix4::identity(), epsilon = 1e-6);
    }

    #[test]
    fn test_closed_form_matches_staged() {
        for p in POSES {
            let pose = pose(p);
            let staged = Transform::camera_to_world_staged(&pose);
            let closed = Transform::camera_to_world(&pose);
            assert_relative_eq!(*closed.as_matrix(), *staged.as_matrix(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_double_inverse() {
        for p in POSES.iter().take(4) {
            let m = Transform::camera_to_world(&pose(p));
            let back = m.inverse().unwrap().inverse().unwrap();
            assert_relative_eq!(*back.as_matrix(), *m.as_matrix(), epsilon = 1e-4);
        }
    }

    #[test]
    fn test_affine_last_column() {
        for p in POSES {
            let m = Transform::camera_to_world(&pose(p));
            assert_eq!(m.get(0, 3), 0.0);
            assert_eq!(m.get(1, 3), 0.0);
            assert_eq!(m.get(2, 3), 0.0);
            assert_eq!(m.get(3, 3), 1.0);
        }
    }

    #[test]
    fn test_camera_origin_is_translation() {
        let m = build_camera_to_world(77.0, 0.0, 5.0, 0.5, -9.0, 3.5);
        let origin = m.mult_vec_matrix(&Vec3f::zeros());
        assert_relative_eq!(origin, Vec3f::new(0.5, -9.0, 3.5));
    }

    #[test]
    fn test_y_rotation_is_negated() {
        let m = Transform::rotation_y(90.0);
        let p = m.mult_vec_matrix(&Vec3f::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3f::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_angles_wrap() {
        let a = build_camera_to_world(30.0, 10.0, -20.0, 0.0, 0.0, 0.0);
        let b = build_camera_to_world(390.0, 370.0, 340.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(*a.as_matrix(), *b.as_matrix(), epsilon = 1e-5);
    }
}
