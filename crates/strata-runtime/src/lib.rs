//! World aggregate: builds every chunk up front, owns the GPU handles it
//! created, and walks the chunk grid once per frame.
#![forbid(unsafe_code)]

mod assets;
mod error;
mod resources;
mod world;

pub use assets::{AssetSource, CATALOG_RELATIVE_PATH};
pub use error::WorldError;
pub use resources::{ChunkGeometry, GeometryPart, GpuResources, ReleaseCounts, ResourceGuard};
pub use world::{RenderStats, World, WorldOptions};
