// src/terrain/world_bounds.rs
use serde::{Deserialize, Serialize};

use crate::terrain::mesh_data::WorldPoint;
use crate::terrain::terrain_config::{GenerationParameters, WorldSize};

/// Axis-aligned box around the terrain a pass produces (or would produce).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub center: WorldPoint,
    pub half_extent: WorldPoint,
}

impl WorldBounds {
    /// Box enclosing every chunk generated for `params`, from the base height
    /// up to the maximum height offset.
    pub fn from_params(params: &GenerationParameters, origin: WorldPoint) -> Self {
        Self::with_side(params, origin, params.chunks_per_side())
    }

    /// Preview volume shown before generating. A square world's multiplier
    /// scales the view distance here; the generated set ignores it.
    pub fn preview(params: &GenerationParameters, origin: WorldPoint) -> Self {
        let chunks_per_side = match params.world_size {
            WorldSize::SingleChunk => 1,
            WorldSize::Square { multiplier: 0 } => 2 * params.view_distance as u64 + 1,
            WorldSize::Square { multiplier } => {
                2 * (multiplier as u64 * params.view_distance as u64) + 1
            }
        };
        Self::with_side(params, origin, chunks_per_side)
    }

    fn with_side(params: &GenerationParameters, origin: WorldPoint, chunks_per_side: u64) -> Self {
        let half_height = params.max_height_offset / 2.0;
        let side = chunks_per_side as f64;

        WorldBounds {
            center: WorldPoint::new(origin.x, origin.y, origin.z + half_height),
            half_extent: WorldPoint::new(
                side * params.chunk_extent_x() / 2.0,
                side * params.chunk_extent_y() / 2.0,
                half_height,
            ),
        }
    }

    pub fn min(&self) -> WorldPoint {
        WorldPoint::new(
            self.center.x - self.half_extent.x,
            self.center.y - self.half_extent.y,
            self.center.z - self.half_extent.z,
        )
    }

    pub fn max(&self) -> WorldPoint {
        WorldPoint::new(
            self.center.x + self.half_extent.x,
            self.center.y + self.half_extent.y,
            self.center.z + self.half_extent.z,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    pub enabled: bool,
    /// Relative water height in [0, 1] between base height and max offset.
    pub level: f64,
    /// Plane size as a percentage of one chunk's footprint.
    pub size_percent: f64,
}

impl Default for WaterSettings {
    fn default() -> Self {
        WaterSettings {
            enabled: false,
            level: 0.1,
            size_percent: 100.0,
        }
    }
}

/// Where the host should put its water plane after a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterPlane {
    pub location: WorldPoint,
    pub scale: WorldPoint,
}

const WATER_PLANE_THICKNESS: f64 = 0.1;

impl WaterPlane {
    pub fn place(
        settings: &WaterSettings,
        params: &GenerationParameters,
        origin: WorldPoint,
    ) -> Option<WaterPlane> {
        if !settings.enabled {
            return None;
        }

        let size = settings.size_percent / 100.0;
        Some(WaterPlane {
            location: WorldPoint::new(
                origin.x,
                origin.y,
                origin.z + params.max_height_offset * settings.level,
            ),
            scale: WorldPoint::new(
                params.chunk_extent_x() * size,
                params.chunk_extent_y() * size,
                WATER_PLANE_THICKNESS,
            ),
        })
    }
}
