use std::fmt;

use glam::{Vec2, Vec3};

/// Error returned by [`MeshData::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    AttributeLength { attribute: &'static str, expected: usize, found: usize },
    IndexOutOfRange { index: u32, vertex_count: usize },
    NotTriangles { index_count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::AttributeLength { attribute, expected, found } => {
                write!(f, "mesh has {found} {attribute}, expected {expected}")
            }
            MeshError::IndexOutOfRange { index, vertex_count } => {
                write!(f, "mesh index {index} out of range for {vertex_count} vertices")
            }
            MeshError::NotTriangles { index_count } => {
                write!(f, "mesh index count {index_count} is not a multiple of 3")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// Indexed triangle mesh with one entry per vertex in every attribute list.
///
/// UVs follow the GL convention (v = 0 at the bottom of the image); the mesh
/// shader flips v when sampling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<[f32; 4]>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks attribute lengths and index bounds.
    pub fn validate(&self) -> Result<(), MeshError> {
        let expected = self.vertex_count();
        for (attribute, found) in [
            ("normals", self.normals.len()),
            ("colors", self.colors.len()),
            ("uvs", self.uvs.len()),
        ] {
            if found != expected {
                return Err(MeshError::AttributeLength { attribute, expected, found });
            }
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles { index_count: self.indices.len() });
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= expected) {
            return Err(MeshError::IndexOutOfRange { index, vertex_count: expected });
        }
        Ok(())
    }

    /// Replaces the texture coordinates.
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = uvs;
        self
    }

    /// Sets every vertex color to `rgba` (straight alpha).
    pub fn with_color(mut self, rgba: [f32; 4]) -> Self {
        self.colors = vec![rgba; self.vertex_count()];
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> MeshData {
        MeshData {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: vec![Vec3::Z; 3],
            colors: vec![[1.0; 4]; 3],
            uvs: vec![Vec2::ZERO; 3],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn valid_triangle_passes() {
        let m = triangle();
        assert_eq!(m.validate(), Ok(()));
        assert_eq!(m.triangle_count(), 1);
    }

    #[test]
    fn short_attribute_is_reported() {
        let mut m = triangle();
        m.uvs.pop();
        assert_eq!(
            m.validate(),
            Err(MeshError::AttributeLength { attribute: "uvs", expected: 3, found: 2 })
        );
    }

    #[test]
    fn bad_indices_are_reported() {
        let mut m = triangle();
        m.indices = vec![0, 1, 3];
        assert_eq!(m.validate(), Err(MeshError::IndexOutOfRange { index: 3, vertex_count: 3 }));

        m.indices = vec![0, 1];
        assert_eq!(m.validate(), Err(MeshError::NotTriangles { index_count: 2 }));
    }

    #[test]
    fn with_color_covers_every_vertex() {
        let m = triangle().with_color([0.5, 0.5, 0.5, 1.0]);
        assert_eq!(m.colors, vec![[0.5, 0.5, 0.5, 1.0]; 3]);
    }
}
