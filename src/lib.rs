//! Procedural heightmap terrain: seeded fractal noise sampled over a grid of
//! chunks, meshed in parallel and committed in order to a mesh owner.

pub mod config;
pub mod error;
pub mod terrain;
pub mod threading;

pub use error::{ConfigurationError, TerrainError};
