// src/error.rs
use thiserror::Error;

use crate::terrain::chunk_map::ChunkPosition;

/// Errors raised by the generation core.
///
/// Both variants are contract violations: parameters are expected to arrive
/// already clamped by the configuration layer, and the composer never inserts
/// the same coordinate twice in one pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("chunk at {0} is already present in the chunk map")]
    DuplicateCoordinate(ChunkPosition),

    #[error("invalid generation parameters: {0}")]
    InvalidParameters(String),
}

/// Errors raised while loading, saving or validating a TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize TOML config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("piece size must be finite and positive, got ({x}, {y})")]
    InvalidPieceSize { x: f64, y: f64 },

    #[error("configured terrain cannot be generated: {0}")]
    Generation(#[from] TerrainError),
}
