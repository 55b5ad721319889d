/// Vector aliases and the row-vector 4x4 matrix used by the camera pipeline
use std::fmt;
use std::ops::Mul;

use nalgebra::{Matrix4, RowVector4, Vector2, Vector3};

use crate::error::{Error, Result};

/// Generic 2D vector
pub type Vec2<T> = Vector2<T>;

/// Generic 3D vector
pub type Vec3<T> = Vector3<T>;

pub type Vec2f = Vec2<f32>;
pub type Vec2i = Vec2<i32>;
pub type Vec3f = Vec3<f32>;

/// Affine transform in homogeneous coordinates using the row-vector
/// convention `v' = v * M`.
///
/// Entry `(row, col)` of the wrapped matrix is row `row` of the transform as
/// it would be written out by hand, so the translation lives in row 3 and
/// the last column of an affine transform is `[0, 0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix44(Matrix4<f32>);

impl Matrix44 {
    pub fn identity() -> Self {
        Self(Matrix4::identity())
    }

    /// Build from rows written in the row-vector layout
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self(Matrix4::from_fn(|r, c| rows[r][c]))
    }

    pub fn rows(&self) -> [[f32; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.0[(r, c)];
            }
        }
        rows
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.0[(row, col)]
    }

    pub fn as_matrix(&self) -> &Matrix4<f32> {
        &self.0
    }

    /// `self * other`: a point transformed by the result is transformed by
    /// `self` first and then by `other`.
    pub fn multiply(&self, other: &Matrix44) -> Matrix44 {
        Self(self.0 * other.0)
    }

    /// General 4x4 inverse
    pub fn inverse(&self) -> Result<Matrix44> {
        self.0.try_inverse().map(Self).ok_or(Error::SingularMatrix)
    }

    /// Transform a point, treating its w as 1 and dividing by the resulting w
    /// when it is not 1.
    pub fn mult_vec_matrix(&self, src: &Vec3f) -> Vec3f {
        let v = RowVector4::new(src.x, src.y, src.z, 1.0) * self.0;
        let w = v[3];
        if w != 1.0 && w != 0.0 {
            Vec3f::new(v[0] / w, v[1] / w, v[2] / w)
        } else {
            Vec3f::new(v[0], v[1], v[2])
        }
    }
}

impl Default for Matrix44 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix44 {
    type Output = Matrix44;

    fn mul(self, rhs: Matrix44) -> Matrix44 {
        self.multiply(&rhs)
    }
}

impl From<[[f32; 4]; 4]> for Matrix44 {
    fn from(rows: [[f32; 4]; 4]) -> Self {
        Self::from_rows(rows)
    }
}

impl fmt::Display for Matrix44 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(
                f,
                "[{:>10.6} {:>10.6} {:>10.6} {:>10.6}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}
