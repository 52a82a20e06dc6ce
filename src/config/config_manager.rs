// src/config/config_manager.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigurationError;
use crate::terrain::terrain_config::{
    GenerationParameters, TerrainConfig, WorldSize, MAX_FREQUENCY, MAX_OCTAVES, MIN_FREQUENCY,
    MIN_OCTAVES,
};
use crate::terrain::world_bounds::WaterSettings;

// --- Struct Definitions ---

/// The `[generation]` table as a user writes it. Integers are signed so that
/// out-of-range input can be clamped (and reported) instead of failing to parse.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    pub piece_row_count: i64,
    pub piece_column_count: i64,
    pub piece_size_x: f64,
    pub piece_size_y: f64,
    pub frequency: f64,
    pub octaves: i64,
    pub seed: i64,
    pub max_height_offset: f64,
    pub invert: bool,
    pub first_material_max_relative_height: f64,
    pub second_material_max_relative_height: f64,
    /// -1 single chunk, 0 square, >0 square with that preview multiplier.
    pub world_size: i64,
    pub view_distance: i64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let params = GenerationParameters::default();
        GenerationSettings {
            piece_row_count: params.piece_row_count as i64,
            piece_column_count: params.piece_column_count as i64,
            piece_size_x: params.piece_size_x,
            piece_size_y: params.piece_size_y,
            frequency: params.frequency,
            octaves: params.octaves as i64,
            seed: params.seed as i64,
            max_height_offset: params.max_height_offset,
            invert: params.invert,
            first_material_max_relative_height: params.first_material_max_relative_height,
            second_material_max_relative_height: params.second_material_max_relative_height,
            world_size: -1,
            view_distance: params.view_distance as i64,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TerrainConfiguration {
    #[serde(default)]
    pub generation: GenerationSettings,

    #[serde(default)]
    pub water: WaterSettings,

    #[serde(default)]
    pub threading: TerrainConfig,
}

// --- Clamping helpers ---

fn clamp_int(name: &str, value: i64, min: i64, max: i64) -> i64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!("Config: {} = {} out of range, clamped to {}", name, value, clamped);
    }
    clamped
}

fn clamp_float(name: &str, value: f64, min: f64, max: f64) -> f64 {
    // NaN falls back to the lower bound
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        log::warn!("Config: {} = {} out of range, clamped to {}", name, value, clamped);
    }
    clamped
}

pub struct ConfigurationManager {
    current_config: TerrainConfiguration,
    config_path: Option<String>, // Path used for loading/saving
}

impl ConfigurationManager {
    pub fn with_config(config: TerrainConfiguration, config_path: Option<String>) -> Self {
        Self {
            current_config: config,
            config_path,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let path_ref = path.as_ref();
        log::info!("Loading config from: {:?}", path_ref);
        let config_str = fs::read_to_string(path_ref)?;

        let config: TerrainConfiguration = toml::from_str(&config_str).map_err(|e| {
            log::error!("Failed to parse TOML config: {}", e);
            e
        })?;

        Ok(Self {
            current_config: config,
            config_path: Some(path_ref.to_string_lossy().into_owned()),
        })
    }

    // Writes to the stored path; without one this is a logged no-op
    pub fn save_to_file(&self) -> Result<(), ConfigurationError> {
        if let Some(path) = &self.config_path {
            log::info!("Saving config to: {}", path);
            let toml_string = toml::to_string_pretty(&self.current_config)?;
            fs::write(path, toml_string)?;
        } else {
            log::warn!("Cannot save configuration: No config path set.");
        }
        Ok(())
    }

    pub fn set_config_path<P: AsRef<Path>>(&mut self, path: P) {
        self.config_path = Some(path.as_ref().to_string_lossy().into_owned());
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }

    pub fn update_config(&mut self, updates: TerrainConfiguration) {
        self.current_config = updates;
    }

    pub fn get_config_mut(&mut self) -> &mut TerrainConfiguration {
        &mut self.current_config
    }

    pub fn get_config(&self) -> &TerrainConfiguration {
        &self.current_config
    }

    /// Rejects what clamping cannot repair.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let generation = &self.current_config.generation;
        let (x, y) = (generation.piece_size_x, generation.piece_size_y);
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;

        // Chunk extent as generated, after the piece counts are clamped
        let count = |n: i64| n.clamp(1, u32::MAX as i64) as f64;
        let extent_x = count(generation.piece_column_count) * x;
        let extent_y = count(generation.piece_row_count) * y;

        if !(finite_positive(x) && finite_positive(y))
            || !(extent_x.is_finite() && extent_y.is_finite())
        {
            return Err(ConfigurationError::InvalidPieceSize { x, y });
        }
        Ok(())
    }

    /// Validated, clamped parameters ready for `TerrainComposer::generate_world`.
    pub fn generation_parameters(&self) -> Result<GenerationParameters, ConfigurationError> {
        self.validate()?;
        let g = &self.current_config.generation;
        let u32_max = u32::MAX as i64;

        let world_size = match clamp_int("world_size", g.world_size, -1, u32_max) {
            -1 => WorldSize::SingleChunk,
            multiplier => WorldSize::Square {
                multiplier: multiplier as u32,
            },
        };

        let first = clamp_float(
            "first_material_max_relative_height",
            g.first_material_max_relative_height,
            0.0,
            1.0,
        );
        let mut second = clamp_float(
            "second_material_max_relative_height",
            g.second_material_max_relative_height,
            0.0,
            1.0,
        );
        if second < first {
            log::warn!(
                "Config: material thresholds out of order ({} > {}), raising second to {}",
                first,
                second,
                first
            );
            second = first;
        }

        let params = GenerationParameters {
            piece_row_count: clamp_int("piece_row_count", g.piece_row_count, 1, u32_max) as u32,
            piece_column_count: clamp_int("piece_column_count", g.piece_column_count, 1, u32_max)
                as u32,
            piece_size_x: g.piece_size_x,
            piece_size_y: g.piece_size_y,
            frequency: clamp_float("frequency", g.frequency, MIN_FREQUENCY, MAX_FREQUENCY),
            octaves: clamp_int(
                "octaves",
                g.octaves,
                MIN_OCTAVES as i64,
                MAX_OCTAVES as i64,
            ) as u32,
            seed: clamp_int("seed", g.seed, 0, u32_max) as u32,
            max_height_offset: clamp_float(
                "max_height_offset",
                g.max_height_offset,
                0.0,
                f64::MAX,
            ),
            invert: g.invert,
            first_material_max_relative_height: first,
            second_material_max_relative_height: second,
            world_size,
            view_distance: clamp_int("view_distance", g.view_distance, 1, i32::MAX as i64)
                as u32,
        };

        // Clamping cannot fix everything, e.g. a huge world span
        params.check()?;
        Ok(params)
    }

    pub fn terrain_config(&self) -> TerrainConfig {
        self.current_config.threading.clone()
    }

    pub fn water_settings(&self) -> WaterSettings {
        let water = &self.current_config.water;
        WaterSettings {
            enabled: water.enabled,
            level: clamp_float("water.level", water.level, 0.0, 1.0),
            size_percent: clamp_float("water.size_percent", water.size_percent, 0.0, f64::MAX),
        }
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        log::debug!("Creating default TerrainConfiguration");
        Self {
            current_config: TerrainConfiguration::default(),
            config_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;

    fn manager_with(generation: GenerationSettings) -> ConfigurationManager {
        ConfigurationManager::with_config(
            TerrainConfiguration {
                generation,
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn defaults_map_to_default_parameters() {
        let params = ConfigurationManager::default().generation_parameters().unwrap();
        assert_eq!(params, GenerationParameters::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let manager = manager_with(GenerationSettings {
            piece_row_count: 0,
            piece_column_count: -4,
            frequency: 100.0,
            octaves: 40,
            seed: -9,
            max_height_offset: -10.0,
            world_size: -7,
            view_distance: 0,
            ..Default::default()
        });

        let params = manager.generation_parameters().unwrap();
        assert_eq!(params.piece_row_count, 1);
        assert_eq!(params.piece_column_count, 1);
        assert_eq!(params.frequency, MAX_FREQUENCY);
        assert_eq!(params.octaves, MAX_OCTAVES);
        assert_eq!(params.seed, 0);
        assert_eq!(params.max_height_offset, 0.0);
        assert_eq!(params.world_size, WorldSize::SingleChunk);
        assert_eq!(params.view_distance, 1);
    }

    #[test]
    fn low_frequency_and_octaves_clamp_up() {
        let manager = manager_with(GenerationSettings {
            frequency: 0.0,
            octaves: 0,
            ..Default::default()
        });
        let params = manager.generation_parameters().unwrap();
        assert_eq!(params.frequency, MIN_FREQUENCY);
        assert_eq!(params.octaves, MIN_OCTAVES);
    }

    #[test]
    fn world_size_modes() {
        let square = manager_with(GenerationSettings {
            world_size: 0,
            ..Default::default()
        });
        assert_eq!(
            square.generation_parameters().unwrap().world_size,
            WorldSize::Square { multiplier: 0 }
        );

        let preview = manager_with(GenerationSettings {
            world_size: 4,
            ..Default::default()
        });
        assert_eq!(
            preview.generation_parameters().unwrap().world_size,
            WorldSize::Square { multiplier: 4 }
        );
    }

    #[test]
    fn thresholds_are_clamped_and_ordered() {
        let manager = manager_with(GenerationSettings {
            first_material_max_relative_height: 0.8,
            second_material_max_relative_height: 1.5,
            ..Default::default()
        });
        let params = manager.generation_parameters().unwrap();
        assert_eq!(params.second_material_max_relative_height, 1.0);

        let manager = manager_with(GenerationSettings {
            first_material_max_relative_height: 0.6,
            second_material_max_relative_height: 0.2,
            ..Default::default()
        });
        let params = manager.generation_parameters().unwrap();
        assert_eq!(params.first_material_max_relative_height, 0.6);
        assert_eq!(params.second_material_max_relative_height, 0.6);
        assert!(params.check().is_ok());
    }

    #[test]
    fn non_positive_piece_size_is_rejected() {
        let manager = manager_with(GenerationSettings {
            piece_size_y: 0.0,
            ..Default::default()
        });
        assert!(matches!(
            manager.generation_parameters(),
            Err(ConfigurationError::InvalidPieceSize { x, y }) if x == 300.0 && y == 0.0
        ));
    }

    #[test]
    fn infinite_or_overflowing_piece_size_is_rejected() {
        let infinite = manager_with(GenerationSettings {
            piece_size_x: f64::INFINITY,
            ..Default::default()
        });
        assert!(matches!(
            infinite.validate(),
            Err(ConfigurationError::InvalidPieceSize { .. })
        ));

        let overflowing = manager_with(GenerationSettings {
            piece_size_y: 1e308,
            piece_row_count: 10,
            ..Default::default()
        });
        assert!(matches!(
            overflowing.generation_parameters(),
            Err(ConfigurationError::InvalidPieceSize { .. })
        ));
    }

    #[test]
    fn unbounded_world_span_is_reported() {
        let manager = manager_with(GenerationSettings {
            piece_size_x: 1e307,
            piece_column_count: 10,
            world_size: 0,
            view_distance: 3,
            ..Default::default()
        });
        assert!(manager.validate().is_ok());
        assert!(matches!(
            manager.generation_parameters(),
            Err(ConfigurationError::Generation(TerrainError::InvalidParameters(_)))
        ));
    }

    #[test]
    fn infinite_height_offset_clamps_to_finite() {
        let manager = manager_with(GenerationSettings {
            max_height_offset: f64::INFINITY,
            ..Default::default()
        });
        // Clamped to f64::MAX, which is still finite
        let params = manager.generation_parameters().unwrap();
        assert_eq!(params.max_height_offset, f64::MAX);
    }

    #[test]
    fn water_level_is_clamped() {
        let mut manager = ConfigurationManager::default();
        manager.get_config_mut().water.level = 3.0;
        assert_eq!(manager.water_settings().level, 1.0);
    }

    #[test]
    fn save_without_path_is_a_no_op() {
        assert!(ConfigurationManager::default().save_to_file().is_ok());
    }
}
