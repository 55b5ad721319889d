/// Indexed triangle geometry
use crate::error::{Error, Result};
use crate::math::Vec3f;

/// World-space vertices plus a flat index buffer; every three consecutive
/// indices form one triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3f>,
    pub indices: Vec<usize>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(vertices: Vec<Vec3f>, indices: Vec<usize>) -> Self {
        Self { vertices, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another object, shifting its indices past the existing vertices.
    /// Leaves `self` untouched on failure.
    pub fn append(&mut self, other: Mesh) -> Result<()> {
        let base = self.vertices.len();
        let len = base.saturating_add(other.vertices.len());
        let indices = other
            .indices
            .iter()
            .map(|&i| {
                i.checked_add(base)
                    .ok_or(Error::IndexOutOfRange { index: i, len })
            })
            .collect::<Result<Vec<_>>>()?;
        self.vertices.extend(other.vertices);
        self.indices.extend(indices);
        Ok(())
    }

    /// Check that the index buffer holds whole triangles and only references
    /// existing vertices
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }
        let len = self.vertices.len();
        match self.indices.iter().find(|&&i| i >= len) {
            Some(&index) => Err(Error::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// Axis aligned cube centred on the origin
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = vec![
            Vec3f::new(-h, -h, h),
            Vec3f::new(h, -h, h),
            Vec3f::new(h, h, h),
            Vec3f::new(-h, h, h),
            Vec3f::new(-h, -h, -h),
            Vec3f::new(h, -h, -h),
            Vec3f::new(h, h, -h),
            Vec3f::new(-h, h, -h),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2,  0, 2, 3, // front
            5, 4, 7,  5, 7, 6, // back
            3, 2, 6,  3, 6, 7, // top
            4, 5, 1,  4, 1, 0, // bottom
            1, 5, 6,  1, 6, 2, // right
            4, 0, 3,  4, 3, 7, // left
        ];
        Self { vertices, indices }
    }
}
