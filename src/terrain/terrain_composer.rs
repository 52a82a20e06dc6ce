// src/terrain/terrain_composer.rs
use std::time::Instant;

use serde::Serialize;

use crate::error::TerrainError;
use crate::terrain::chunk_generator::ChunkGenerator;
use crate::terrain::chunk_map::{Chunk, ChunkMap, ChunkPosition};
use crate::terrain::mesh_data::{ChunkMeshData, WorldPoint};
use crate::terrain::mesh_owner::MeshOwner;
use crate::terrain::noise::NoiseField;
use crate::terrain::seed::SeedGenerator;
use crate::terrain::terrain_config::{GenerationParameters, TerrainConfig, WorldSize};
use crate::terrain::world_bounds::WorldBounds;
use crate::threading::ThreadPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorldState {
    Empty,
    Generated,
}

/// What one pass produced. Hosts use `bounds` and `height_range` to place
/// auxiliary geometry such as a water plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub seed: u32,
    pub chunk_count: usize,
    pub vertex_count: usize,
    pub triangle_count: usize,
    /// Lowest and highest generated z.
    pub height_range: Option<(f32, f32)>,
    pub bounds: WorldBounds,
}

/// Chunk coordinates for a pass, in the order section indices are assigned:
/// x outer, y inner, both from -view_distance to +view_distance.
///
/// Expects parameters that passed `GenerationParameters::check`.
pub fn chunk_positions(params: &GenerationParameters) -> Vec<ChunkPosition> {
    match params.world_size {
        WorldSize::SingleChunk => vec![ChunkPosition::ORIGIN],
        WorldSize::Square { .. } => {
            let Ok(view) = i32::try_from(params.view_distance) else {
                log::error!("view distance {} is out of range", params.view_distance);
                return Vec::new();
            };
            let mut positions = Vec::with_capacity(params.chunk_count());
            for x in -view..=view {
                for y in -view..=view {
                    positions.push(ChunkPosition::new(x, y));
                }
            }
            positions
        }
    }
}

/// Owns the world's chunks and rebuilds them on demand.
pub struct TerrainComposer {
    chunk_map: ChunkMap,
    seed_generator: SeedGenerator,
    // None runs every chunk on the calling thread
    thread_pool: Option<ThreadPool>,
    state: WorldState,
    last_seed: Option<u32>,
}

impl TerrainComposer {
    pub fn new(config: &TerrainConfig) -> Self {
        let thread_pool = if config.use_parallel_processing() {
            match ThreadPool::from_config(config) {
                Ok(pool) => Some(pool),
                Err(e) => {
                    log::warn!(
                        "TerrainComposer: thread pool unavailable ({}), generating serially",
                        e
                    );
                    None
                }
            }
        } else {
            None
        };

        Self {
            chunk_map: ChunkMap::new(),
            seed_generator: SeedGenerator::from_entropy(),
            thread_pool,
            state: WorldState::Empty,
            last_seed: None,
        }
    }

    pub fn with_seed_generator(mut self, seed_generator: SeedGenerator) -> Self {
        self.seed_generator = seed_generator;
        self
    }

    pub fn state(&self) -> WorldState {
        self.state
    }

    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    /// Seed used by the most recent pass.
    pub fn last_seed(&self) -> Option<u32> {
        self.last_seed
    }

    pub fn is_parallel(&self) -> bool {
        self.thread_pool.is_some()
    }

    /// Drops every chunk and its mesh-owner section.
    pub fn clear(&mut self, mesh_owner: &mut dyn MeshOwner) {
        self.chunk_map.clear_world(mesh_owner);
        self.state = WorldState::Empty;
    }

    /// Runs one full pass: clear, reseed, build every chunk, commit in order.
    ///
    /// Chunk meshes are computed in parallel when a pool is configured; the
    /// mesh owner is only called from this thread, in section-index order.
    /// On error the world is left empty.
    pub fn generate_world(
        &mut self,
        params: &GenerationParameters,
        mesh_owner: &mut dyn MeshOwner,
        origin: WorldPoint,
    ) -> Result<WorldSummary, TerrainError> {
        params.check()?;

        let started = Instant::now();
        self.clear(mesh_owner);

        let seed = self.seed_generator.resolve_seed(params.seed);
        self.last_seed = Some(seed);

        let noise = NoiseField::new(seed);
        let generator = ChunkGenerator::new(params, &noise, origin);
        let positions = chunk_positions(params);

        log::info!(
            "TerrainComposer: generating {} chunk(s) of {}x{} pieces, seed {}",
            positions.len(),
            params.piece_row_count,
            params.piece_column_count,
            seed
        );

        let meshes: Vec<ChunkMeshData> = match &self.thread_pool {
            Some(pool) if positions.len() > 1 => {
                pool.par_execute(&positions, |position| generator.build_mesh(*position))
            }
            _ => positions
                .iter()
                .map(|position| generator.build_mesh(*position))
                .collect(),
        };

        for (section_index, (position, mesh)) in positions.into_iter().zip(meshes).enumerate() {
            let chunk = Chunk::commit(position, section_index, mesh, mesh_owner);
            log::debug!("TerrainComposer: chunk {} -> section {}", position, section_index);

            if let Err(e) = self.chunk_map.add_chunk(chunk) {
                log::error!("TerrainComposer: {}", e);
                // The rejected chunk's section was already created
                mesh_owner.clear_section(section_index);
                self.clear(mesh_owner);
                return Err(e);
            }
        }

        self.state = WorldState::Generated;
        let summary = self.summarize(seed, params, origin);

        log::info!(
            "TerrainComposer: generated {} chunk(s), {} vertices, {} triangles in {:?}",
            summary.chunk_count,
            summary.vertex_count,
            summary.triangle_count,
            started.elapsed()
        );

        Ok(summary)
    }

    fn summarize(
        &self,
        seed: u32,
        params: &GenerationParameters,
        origin: WorldPoint,
    ) -> WorldSummary {
        let mut vertex_count = 0;
        let mut triangle_count = 0;
        let mut height_range: Option<(f32, f32)> = None;

        for chunk in self.chunk_map.chunks_by_section() {
            vertex_count += chunk.mesh.vertex_count();
            triangle_count += chunk.mesh.triangle_count();

            if let Some((lo, hi)) = chunk.mesh.height_range() {
                height_range = Some(match height_range {
                    None => (lo, hi),
                    Some((min, max)) => (min.min(lo), max.max(hi)),
                });
            }
        }

        WorldSummary {
            seed,
            chunk_count: self.chunk_map.len(),
            vertex_count,
            triangle_count,
            height_range,
            bounds: WorldBounds::from_params(params, origin),
        }
    }
}
