use cubescene_math::Vector3;

/// Geometry defects rejected at mesh construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("malformed mesh: index count {0} is not a multiple of 3")]
    NotTriangleList(usize),
    #[error("malformed mesh: index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("malformed mesh: {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },
    #[error("malformed mesh: {uvs} uvs for {vertices} vertices")]
    UvCountMismatch { uvs: usize, vertices: usize },
    #[error("malformed mesh: {0} position floats is not a multiple of 3")]
    RaggedPositions(usize),
}

/// Static triangle-list geometry.
///
/// Validated once at construction and immutable afterwards. Nodes share a
/// mesh through `Arc<Mesh>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vector3>,
    indices: Vec<u32>,
    normals: Option<Vec<Vector3>>,
    uvs: Option<Vec<[f32; 2]>>,
}

impl Mesh {
    /// Validate and build a mesh. Nothing is returned on failure.
    pub fn new(
        vertices: Vec<Vector3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vector3>>,
        uvs: Option<Vec<[f32; 2]>>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangleList(indices.len()));
        }
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, i)| **i as usize >= vertices.len())
        {
            return Err(MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count: vertices.len(),
            });
        }
        if let Some(n) = &normals {
            if n.len() != vertices.len() {
                return Err(MeshError::NormalCountMismatch {
                    normals: n.len(),
                    vertices: vertices.len(),
                });
            }
        }
        if let Some(uv) = &uvs {
            if uv.len() != vertices.len() {
                return Err(MeshError::UvCountMismatch {
                    uvs: uv.len(),
                    vertices: vertices.len(),
                });
            }
        }
        Ok(Self {
            vertices,
            indices,
            normals,
            uvs,
        })
    }

    /// Build from packed `x, y, z` floats.
    pub fn from_flat_positions(positions: &[f32], indices: Vec<u32>) -> Result<Self, MeshError> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::RaggedPositions(positions.len()));
        }
        let vertices = positions
            .chunks_exact(3)
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();
        Self::new(vertices, indices, None, None)
    }

    /// Axis-aligned cube spanning `-1..1` on every axis: 6 faces, 4 vertices
    /// per face so each face carries its own normal and UVs.
    pub fn cube() -> Self {
        const FACES: [([[f32; 3]; 4], [f32; 3]); 6] = [
            // front
            ([[-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [1.0, 1.0, 1.0], [-1.0, 1.0, 1.0]], [0.0, 0.0, 1.0]),
            // back
            ([[-1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [1.0, 1.0, -1.0], [1.0, -1.0, -1.0]], [0.0, 0.0, -1.0]),
            // top
            ([[-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, -1.0]], [0.0, 1.0, 0.0]),
            // bottom
            ([[-1.0, -1.0, -1.0], [1.0, -1.0, -1.0], [1.0, -1.0, 1.0], [-1.0, -1.0, 1.0]], [0.0, -1.0, 0.0]),
            // right
            ([[1.0, -1.0, -1.0], [1.0, 1.0, -1.0], [1.0, 1.0, 1.0], [1.0, -1.0, 1.0]], [1.0, 0.0, 0.0]),
            // left
            ([[-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0]], [-1.0, 0.0, 0.0]),
        ];
        const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

        let mut vertices = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut uvs = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (face, (corners, normal)) in FACES.iter().enumerate() {
            let base = (face * 4) as u32;
            for corner in corners {
                vertices.push(Vector3::from(*corner));
                normals.push(Vector3::from(*normal));
            }
            uvs.extend_from_slice(&FACE_UVS);
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self {
            vertices,
            indices,
            normals: Some(normals),
            uvs: Some(uvs),
        }
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn normals(&self) -> Option<&[Vector3]> {
        self.normals.as_deref()
    }

    pub fn uvs(&self) -> Option<&[[f32; 2]]> {
        self.uvs.as_deref()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions packed as `x, y, z` floats, ready for a vertex buffer.
    pub fn flat_positions(&self) -> Vec<f32> {
        self.vertices.iter().flat_map(|v| v.to_array()).collect()
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vector3, Vector3)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), v| {
            (
                Vector3::new(lo.x.min(v.x), lo.y.min(v.y), lo.z.min(v.z)),
                Vector3::new(hi.x.max(v.x), hi.y.max(v.y), hi.z.max(v.z)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vector3> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn valid_triangle() {
        let mesh = Mesh::new(triangle(), vec![0, 1, 2], None, None).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.normals().is_none());
    }

    #[test]
    fn rejects_non_triangle_index_count() {
        let err = Mesh::new(triangle(), vec![0, 1, 2, 3], None, None).unwrap_err();
        assert_eq!(err, MeshError::NotTriangleList(4));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let err = Mesh::new(triangle(), vec![0, 1, 3], None, None).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                position: 2,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn rejects_normal_count_mismatch() {
        let normals = vec![Vector3::new(0.0, 0.0, 1.0); 2];
        let err = Mesh::new(triangle(), vec![0, 1, 2], Some(normals), None).unwrap_err();
        assert!(matches!(err, MeshError::NormalCountMismatch { normals: 2, vertices: 3 }));
    }

    #[test]
    fn rejects_uv_count_mismatch() {
        let err = Mesh::new(triangle(), vec![0, 1, 2], None, Some(vec![[0.0, 0.0]])).unwrap_err();
        assert!(matches!(err, MeshError::UvCountMismatch { uvs: 1, vertices: 3 }));
    }

    #[test]
    fn flat_positions_round_trip() {
        let flat = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = Mesh::from_flat_positions(&flat, vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.flat_positions(), flat.to_vec());
        assert_eq!(
            Mesh::from_flat_positions(&flat[..8], vec![]).unwrap_err(),
            MeshError::RaggedPositions(8)
        );
    }

    #[test]
    fn cube_is_well_formed() {
        let cube = Mesh::cube();
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.index_count(), 36);
        assert_eq!(cube.normals().map(<[_]>::len), Some(24));
        assert_eq!(cube.uvs().map(<[_]>::len), Some(24));

        // Re-validating through the checked constructor must succeed.
        let rebuilt = Mesh::new(
            cube.vertices().to_vec(),
            cube.indices().to_vec(),
            cube.normals().map(<[_]>::to_vec),
            cube.uvs().map(<[_]>::to_vec),
        )
        .unwrap();
        assert_eq!(rebuilt, cube);
    }

    #[test]
    fn cube_normals_point_outwards() {
        let cube = Mesh::cube();
        let normals = cube.normals().unwrap();
        for (v, n) in cube.vertices().iter().zip(normals) {
            assert!(v.dot(*n) > 0.0, "{v:?} / {n:?}");
        }
    }

    #[test]
    fn cube_bounds() {
        let (lo, hi) = Mesh::cube().bounds().unwrap();
        assert_eq!(lo, Vector3::new(-1.0, -1.0, -1.0));
        assert_eq!(hi, Vector3::new(1.0, 1.0, 1.0));
        let empty = Mesh::new(vec![], vec![], None, None).unwrap();
        assert!(empty.bounds().is_none());
    }
}
