// src/terrain/mesh_owner.rs
use std::collections::HashMap;

use serde::Serialize;

use crate::terrain::mesh_data::MeshGeometry;

/// Opaque reference to a section living inside a mesh owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SectionHandle {
    pub section_index: usize,
    /// Bumped by the owner on every create, so a recreated section never
    /// compares equal to a stale handle.
    pub revision: u64,
}

/// The engine-side object holding mesh sections (a procedural mesh
/// component, an `ArrayMesh`, a GPU buffer pool, ...).
///
/// Calls arrive from a single thread, in section-index order during a pass.
pub trait MeshOwner {
    fn create_section(
        &mut self,
        section_index: usize,
        geometry: &MeshGeometry,
        build_collision: bool,
    ) -> SectionHandle;

    fn clear_section(&mut self, section_index: usize);

    fn get_section(&self, section_index: usize) -> Option<SectionHandle>;
}

#[derive(Debug, Clone)]
pub struct StoredSection {
    pub handle: SectionHandle,
    pub geometry: MeshGeometry,
    pub build_collision: bool,
}

// Keeps sections in memory; used headless (CLI, tests)
#[derive(Debug, Default)]
pub struct HeadlessMeshOwner {
    sections: HashMap<usize, StoredSection>,
    next_revision: u64,
    create_calls: usize,
    clear_calls: usize,
}

impl HeadlessMeshOwner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(&self, section_index: usize) -> Option<&StoredSection> {
        self.sections.get(&section_index)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls
    }
}

impl MeshOwner for HeadlessMeshOwner {
    fn create_section(
        &mut self,
        section_index: usize,
        geometry: &MeshGeometry,
        build_collision: bool,
    ) -> SectionHandle {
        self.next_revision += 1;
        self.create_calls += 1;

        let handle = SectionHandle {
            section_index,
            revision: self.next_revision,
        };
        log::trace!(
            "HeadlessMeshOwner: create section {} ({} vertices, {} indices)",
            section_index,
            geometry.vertices.len(),
            geometry.triangles.len()
        );

        self.sections.insert(
            section_index,
            StoredSection {
                handle,
                geometry: geometry.clone(),
                build_collision,
            },
        );
        handle
    }

    fn clear_section(&mut self, section_index: usize) {
        self.clear_calls += 1;
        if self.sections.remove(&section_index).is_none() {
            log::warn!("HeadlessMeshOwner: clear of unknown section {}", section_index);
        }
    }

    fn get_section(&self, section_index: usize) -> Option<SectionHandle> {
        self.sections.get(&section_index).map(|s| s.handle)
    }
}
