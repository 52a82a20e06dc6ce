// src/terrain/chunk_map.rs
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;
use crate::terrain::mesh_data::ChunkMeshData;
use crate::terrain::mesh_owner::{MeshOwner, SectionHandle};

// Grid coordinate of a chunk, relative to the origin chunk (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkPosition {
    pub x: i32,
    pub y: i32,
}

impl ChunkPosition {
    pub const ORIGIN: ChunkPosition = ChunkPosition { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One generated tile: its mesh plus the section it occupies in the mesh owner.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub position: ChunkPosition,
    pub section_index: usize,
    pub mesh: ChunkMeshData,
    pub section: SectionHandle,
}

impl Chunk {
    /// Hands `mesh` to the owner as section `section_index` (collision on)
    /// and wraps the result.
    pub fn commit(
        position: ChunkPosition,
        section_index: usize,
        mesh: ChunkMeshData,
        mesh_owner: &mut dyn MeshOwner,
    ) -> Chunk {
        let section = mesh_owner.create_section(section_index, &mesh.to_geometry(), true);

        Chunk {
            position,
            section_index,
            mesh,
            section,
        }
    }
}

/// All chunks of the current world, keyed by grid coordinate.
#[derive(Debug, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkPosition, Chunk>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chunk(&mut self, chunk: Chunk) -> Result<(), TerrainError> {
        if self.chunks.contains_key(&chunk.position) {
            return Err(TerrainError::DuplicateCoordinate(chunk.position));
        }

        self.chunks.insert(chunk.position, chunk);
        Ok(())
    }

    /// Clears every stored section in the owner, then forgets the chunks.
    pub fn clear_world(&mut self, mesh_owner: &mut dyn MeshOwner) {
        let mut sections: Vec<usize> = self.chunks.values().map(|c| c.section_index).collect();
        sections.sort_unstable();

        for section_index in &sections {
            mesh_owner.clear_section(*section_index);
        }

        if !sections.is_empty() {
            log::debug!("ChunkMap: cleared {} sections", sections.len());
        }
        self.chunks.clear();
    }

    pub fn lookup(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    // Chunks ordered by section index, i.e. generation order
    pub fn chunks_by_section(&self) -> Vec<&Chunk> {
        let mut chunks: Vec<&Chunk> = self.chunks.values().collect();
        chunks.sort_by_key(|c| c.section_index);
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::mesh_owner::HeadlessMeshOwner;

    fn chunk_at(x: i32, y: i32, section_index: usize, owner: &mut HeadlessMeshOwner) -> Chunk {
        Chunk::commit(ChunkPosition::new(x, y), section_index, ChunkMeshData::default(), owner)
    }

    #[test]
    fn duplicate_coordinate_is_rejected() {
        let mut owner = HeadlessMeshOwner::new();
        let mut map = ChunkMap::new();

        map.add_chunk(chunk_at(1, -1, 0, &mut owner)).unwrap();
        let err = map.add_chunk(chunk_at(1, -1, 1, &mut owner)).unwrap_err();

        assert_eq!(err, TerrainError::DuplicateCoordinate(ChunkPosition::new(1, -1)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.lookup(ChunkPosition::new(1, -1)).unwrap().section_index, 0);
    }

    #[test]
    fn clear_world_releases_sections_and_allows_reuse() {
        let mut owner = HeadlessMeshOwner::new();
        let mut map = ChunkMap::new();
        map.add_chunk(chunk_at(0, 0, 0, &mut owner)).unwrap();
        map.add_chunk(chunk_at(0, 1, 1, &mut owner)).unwrap();
        assert_eq!(owner.section_count(), 2);

        map.clear_world(&mut owner);

        assert!(map.is_empty());
        assert_eq!(owner.section_count(), 0);
        assert_eq!(owner.clear_calls(), 2);
        assert!(map.lookup(ChunkPosition::ORIGIN).is_none());

        map.add_chunk(chunk_at(0, 0, 0, &mut owner)).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn clearing_an_empty_map_touches_nothing() {
        let mut owner = HeadlessMeshOwner::new();
        let mut map = ChunkMap::new();
        map.clear_world(&mut owner);
        assert_eq!(owner.clear_calls(), 0);
    }

    #[test]
    fn chunks_by_section_is_ordered() {
        let mut owner = HeadlessMeshOwner::new();
        let mut map = ChunkMap::new();
        for (n, (x, y)) in [(2, 2), (-1, 0), (0, 5), (3, -3)].into_iter().enumerate() {
            map.add_chunk(chunk_at(x, y, n, &mut owner)).unwrap();
        }

        let order: Vec<usize> = map.chunks_by_section().iter().map(|c| c.section_index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn position_display() {
        assert_eq!(ChunkPosition::new(-3, 7).to_string(), "(-3, 7)");
    }
}
