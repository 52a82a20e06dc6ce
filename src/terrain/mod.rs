// Export all components from the terrain module
pub mod chunk_generator;
pub mod chunk_map;
pub mod generation_utils;
pub mod mesh_data;
pub mod mesh_owner;
pub mod noise;
pub mod seed;
pub mod terrain_composer;
pub mod terrain_config;
pub mod world_bounds;

// Re-export main types for easier access
pub use chunk_generator::ChunkGenerator;
pub use chunk_map::{Chunk, ChunkMap, ChunkPosition};
pub use mesh_data::{ChunkMeshData, MeshGeometry, Vertex, WorldPoint};
pub use mesh_owner::{HeadlessMeshOwner, MeshOwner, SectionHandle};
pub use seed::SeedGenerator;
pub use terrain_composer::{TerrainComposer, WorldState, WorldSummary};
pub use terrain_config::{GenerationParameters, TerrainConfig, WorldSize};
pub use world_bounds::{WaterPlane, WaterSettings, WorldBounds};
