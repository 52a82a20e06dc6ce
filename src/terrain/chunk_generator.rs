// src/terrain/chunk_generator.rs
use crate::terrain::chunk_map::{Chunk, ChunkPosition};
use crate::terrain::generation_utils::{blend_weight, build_triangle_indices};
use crate::terrain::mesh_data::{ChunkMeshData, Vertex, WorldPoint};
use crate::terrain::mesh_owner::MeshOwner;
use crate::terrain::noise::NoiseField;
use crate::terrain::terrain_config::GenerationParameters;

/// Turns grid coordinates into chunk meshes for one generation pass.
///
/// Holds only shared references, so one generator can be used from every
/// worker thread at once.
pub struct ChunkGenerator<'a> {
    params: &'a GenerationParameters,
    noise: &'a NoiseField,
    origin: WorldPoint,
    // Noise domain scale: full local grid span divided by frequency
    domain_x: f64,
    domain_y: f64,
}

impl<'a> ChunkGenerator<'a> {
    /// `origin` is the world position of chunk (0, 0)'s centre at base height.
    pub fn new(
        params: &'a GenerationParameters,
        noise: &'a NoiseField,
        origin: WorldPoint,
    ) -> Self {
        debug_assert!(params.frequency > 0.0, "frequency must be validated upstream");

        Self {
            params,
            noise,
            origin,
            domain_x: params.chunk_extent_x() / params.frequency,
            domain_y: params.chunk_extent_y() / params.frequency,
        }
    }

    /// World position of a chunk's centre.
    pub fn chunk_origin(&self, position: ChunkPosition) -> WorldPoint {
        WorldPoint {
            x: self.origin.x + position.x as f64 * self.params.chunk_extent_x(),
            y: self.origin.y + position.y as f64 * self.params.chunk_extent_y(),
            z: self.origin.z,
        }
    }

    /// Samples the height field over the chunk's vertex grid.
    ///
    /// Every vertex is evaluated at its absolute world coordinate, so two
    /// neighbours sample the same points along their shared edge and meet
    /// without stitching.
    pub fn build_mesh(&self, position: ChunkPosition) -> ChunkMeshData {
        let params = self.params;
        let rows = params.piece_row_count;
        let columns = params.piece_column_count;

        let centre = self.chunk_origin(position);
        let start_x = centre.x - params.chunk_extent_x() / 2.0;
        let start_y = centre.y - params.chunk_extent_y() / 2.0;

        let mut vertices = Vec::with_capacity(params.vertices_per_chunk());

        for i in 0..=rows {
            let y = start_y + i as f64 * params.piece_size_y;

            for j in 0..=columns {
                let x = start_x + j as f64 * params.piece_size_x;

                let mut h = self
                    .noise
                    .sample(x / self.domain_x, y / self.domain_y, params.octaves);
                if params.invert {
                    h = 1.0 - h;
                }

                let z = centre.z + params.max_height_offset * h;
                let weight = blend_weight(
                    h,
                    params.first_material_max_relative_height,
                    params.second_material_max_relative_height,
                );

                vertices.push(Vertex::new([x as f32, y as f32, z as f32], i, j, weight));
            }
        }

        ChunkMeshData {
            vertices,
            indices: build_triangle_indices(rows, columns),
        }
    }

    /// Builds the mesh and registers it with the mesh owner under `section_index`.
    pub fn generate(
        &self,
        position: ChunkPosition,
        section_index: usize,
        mesh_owner: &mut dyn MeshOwner,
    ) -> Chunk {
        let mesh = self.build_mesh(position);
        Chunk::commit(position, section_index, mesh, mesh_owner)
    }
}
