// src/terrain/terrain_config.rs
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

pub const MIN_FREQUENCY: f64 = 0.1;
pub const MAX_FREQUENCY: f64 = 64.0;
pub const MIN_OCTAVES: u32 = 1;
pub const MAX_OCTAVES: u32 = 16;

/// Which chunk coordinates a generation pass produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldSize {
    /// Only the origin chunk (0, 0).
    SingleChunk,
    /// Every chunk within `view_distance` of the origin on both axes.
    /// `multiplier` only enlarges the preview volume, never the generated set.
    Square { multiplier: u32 },
}

impl Default for WorldSize {
    fn default() -> Self {
        WorldSize::SingleChunk
    }
}

/// Immutable inputs for one generation pass.
///
/// The core consumes these as already valid; clamping happens in
/// `config::config_manager`. `check` only rejects values that would break the
/// math (it never corrects them).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    pub piece_row_count: u32,
    pub piece_column_count: u32,
    pub piece_size_x: f64,
    pub piece_size_y: f64,
    pub frequency: f64,
    pub octaves: u32,
    /// Configured seed, 0 picks a random one every pass.
    pub seed: u32,
    pub max_height_offset: f64,
    pub invert: bool,
    pub first_material_max_relative_height: f64,
    pub second_material_max_relative_height: f64,
    pub world_size: WorldSize,
    pub view_distance: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        GenerationParameters {
            piece_row_count: 10,
            piece_column_count: 10,
            piece_size_x: 300.0,
            piece_size_y: 300.0,
            frequency: 3.0,
            octaves: 5,
            seed: 0,
            max_height_offset: 4000.0,
            invert: false,
            first_material_max_relative_height: 0.15,
            second_material_max_relative_height: 0.5,
            world_size: WorldSize::SingleChunk,
            view_distance: 1,
        }
    }
}

impl GenerationParameters {
    /// World-space width of one chunk (along x, columns).
    pub fn chunk_extent_x(&self) -> f64 {
        self.piece_column_count as f64 * self.piece_size_x
    }

    /// World-space depth of one chunk (along y, rows).
    pub fn chunk_extent_y(&self) -> f64 {
        self.piece_row_count as f64 * self.piece_size_y
    }

    /// Vertices per chunk: (R + 1) * (C + 1).
    pub fn vertices_per_chunk(&self) -> usize {
        (self.piece_row_count as usize + 1) * (self.piece_column_count as usize + 1)
    }

    /// Chunks a pass produces in the current world-size mode.
    pub fn chunk_count(&self) -> usize {
        match self.world_size {
            WorldSize::SingleChunk => 1,
            WorldSize::Square { .. } => {
                let side = self.chunks_per_side() as usize;
                side * side
            }
        }
    }

    /// Chunks along one side of the generated square.
    pub fn chunks_per_side(&self) -> u64 {
        match self.world_size {
            WorldSize::SingleChunk => 1,
            WorldSize::Square { .. } => 2 * self.view_distance as u64 + 1,
        }
    }

    // Rejects anything that would leave the grid empty or hand the noise
    // sampler a non-finite coordinate.
    pub fn check(&self) -> Result<(), TerrainError> {
        if !(self.frequency > 0.0 && self.frequency <= MAX_FREQUENCY) {
            return Err(TerrainError::InvalidParameters(format!(
                "frequency must be in (0, {}], got {}",
                MAX_FREQUENCY, self.frequency
            )));
        }
        if self.piece_row_count == 0 || self.piece_column_count == 0 {
            return Err(TerrainError::InvalidParameters(format!(
                "piece grid must be at least 1x1, got {}x{}",
                self.piece_row_count, self.piece_column_count
            )));
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidParameters(
                "octave count must be at least 1".to_string(),
            ));
        }
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !(finite_positive(self.piece_size_x) && finite_positive(self.piece_size_y)) {
            return Err(TerrainError::InvalidParameters(format!(
                "piece size must be finite and positive, got ({}, {})",
                self.piece_size_x, self.piece_size_y
            )));
        }
        if !(self.max_height_offset.is_finite() && self.max_height_offset >= 0.0) {
            return Err(TerrainError::InvalidParameters(format!(
                "max height offset must be finite and not negative, got {}",
                self.max_height_offset
            )));
        }
        if self.view_distance > i32::MAX as u32 {
            return Err(TerrainError::InvalidParameters(format!(
                "view distance must not exceed {}, got {}",
                i32::MAX,
                self.view_distance
            )));
        }

        // The whole world span must stay finite, and the noise domain scale
        // must not underflow to zero.
        let side = self.chunks_per_side() as f64;
        for (axis, extent) in [("x", self.chunk_extent_x()), ("y", self.chunk_extent_y())] {
            if !(finite_positive(extent * side) && finite_positive(extent / self.frequency)) {
                return Err(TerrainError::InvalidParameters(format!(
                    "world extent along {} is out of range ({} per chunk, {} chunks)",
                    axis, extent, side
                )));
            }
        }

        if self.first_material_max_relative_height > self.second_material_max_relative_height {
            return Err(TerrainError::InvalidParameters(format!(
                "material thresholds must ascend, got {} > {}",
                self.first_material_max_relative_height, self.second_material_max_relative_height
            )));
        }
        Ok(())
    }
}

// Runtime settings for how a pass is executed (not what it produces)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub max_threads: usize,
    pub use_parallel_processing: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        let cpu_count = num_cpus::get();

        // Leave one core for the caller, but keep at least one worker
        TerrainConfig {
            max_threads: std::cmp::max(1, cpu_count.saturating_sub(1)),
            use_parallel_processing: true,
        }
    }
}

impl TerrainConfig {
    pub fn serial() -> Self {
        TerrainConfig {
            max_threads: 1,
            use_parallel_processing: false,
        }
    }

    pub fn max_threads(&self) -> usize {
        self.max_threads
    }

    pub fn use_parallel_processing(&self) -> bool {
        self.use_parallel_processing
    }
}
