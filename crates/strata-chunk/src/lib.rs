//! Chunk buffer, neighbor-occupancy visibility, and terrain generation.
#![forbid(unsafe_code)]

mod buf;
mod error;
mod face;
mod generate;
mod visibility;

pub use buf::ChunkBuf;
pub use error::{GenError, ResourceError};
pub use face::Face;
pub use generate::{ChunkGenerateResult, MaterialResolver, generate_chunk_buffer};
pub use visibility::{ChunkNeighbors, VisibleVoxel};
