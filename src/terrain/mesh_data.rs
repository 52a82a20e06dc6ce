// src/terrain/mesh_data.rs
use serde::{Deserialize, Serialize};

/// Flat-shading approximation: every vertex faces straight up.
pub const UP_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
pub const FIXED_TANGENT: [f32; 3] = [0.0, 1.0, 0.0];
/// RGB part of every vertex colour; alpha carries the material blend weight.
pub const BASE_COLOR_RGB: [f32; 3] = [0.0, 0.75, 0.0];

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl WorldPoint {
    pub const ORIGIN: WorldPoint = WorldPoint { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// (row, column) of the vertex in its chunk grid, not normalized.
    pub uv: [f32; 2],
    pub tangent: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], row: u32, column: u32, blend_weight: f32) -> Self {
        let [r, g, b] = BASE_COLOR_RGB;
        Vertex {
            position,
            normal: UP_NORMAL,
            uv: [row as f32, column as f32],
            tangent: FIXED_TANGENT,
            color: [r, g, b, blend_weight],
        }
    }

    pub fn blend_weight(&self) -> f32 {
        self.color[3]
    }
}

/// Buffers produced for one chunk: row-major vertices plus triangle indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkMeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ChunkMeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Lowest and highest z in the chunk, `None` when empty.
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.position[2]).fold(None, |acc, z| match acc {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        })
    }

    /// Splits the vertices into the per-attribute arrays a mesh owner consumes.
    pub fn to_geometry(&self) -> MeshGeometry {
        let count = self.vertices.len();
        let mut geometry = MeshGeometry {
            vertices: Vec::with_capacity(count),
            triangles: self.indices.clone(),
            normals: Vec::with_capacity(count),
            uvs: Vec::with_capacity(count),
            colors: Vec::with_capacity(count),
            tangents: Vec::with_capacity(count),
        };

        for vertex in &self.vertices {
            geometry.vertices.push(vertex.position);
            geometry.normals.push(vertex.normal);
            geometry.uvs.push(vertex.uv);
            geometry.colors.push(vertex.color);
            geometry.tangents.push(vertex.tangent);
        }

        geometry
    }
}

// Struct-of-arrays layout handed to MeshOwner::create_section
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshGeometry {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<u32>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub tangents: Vec<[f32; 3]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_keeps_attribute_order() {
        let mesh = ChunkMeshData {
            vertices: vec![
                Vertex::new([0.0, 0.0, 1.0], 0, 0, 0.0),
                Vertex::new([1.0, 0.0, 2.0], 0, 1, 0.5),
                Vertex::new([0.0, 1.0, 3.0], 1, 0, 1.0),
            ],
            indices: vec![0, 2, 1],
        };

        let geometry = mesh.to_geometry();
        assert_eq!(geometry.vertices.len(), 3);
        assert_eq!(geometry.triangles, vec![0, 2, 1]);
        assert_eq!(geometry.uvs[2], [1.0, 0.0]);
        assert_eq!(geometry.colors[1], [0.0, 0.75, 0.0, 0.5]);
        assert!(geometry.normals.iter().all(|n| *n == UP_NORMAL));
        assert!(geometry.tangents.iter().all(|t| *t == FIXED_TANGENT));
    }

    #[test]
    fn height_range_spans_all_vertices() {
        let mesh = ChunkMeshData {
            vertices: vec![
                Vertex::new([0.0, 0.0, 4.0], 0, 0, 0.0),
                Vertex::new([0.0, 0.0, -2.0], 0, 1, 0.0),
                Vertex::new([0.0, 0.0, 9.5], 1, 0, 0.0),
            ],
            indices: Vec::new(),
        };
        assert_eq!(mesh.height_range(), Some((-2.0, 9.5)));
        assert_eq!(ChunkMeshData::default().height_range(), None);
    }
}
