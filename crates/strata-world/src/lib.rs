//! World sizing, noise sampling, and worldgen parameters.
#![forbid(unsafe_code)]

mod chunk_coord;
mod noise;
pub mod terrain;
pub mod worldgen;

pub use chunk_coord::ChunkCoord;
pub use noise::{NoiseField, TerrainNoise};
pub use terrain::{TerrainGen, TerrainLayer, remap_noise_to_height};
pub use worldgen::{ConfigError, LayerNames, RenderMode, WorldGenConfig, WorldGenParams};
