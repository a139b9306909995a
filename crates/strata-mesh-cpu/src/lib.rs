//! CPU-side cube geometry and per-chunk face batching.
#![forbid(unsafe_code)]

mod chunk;
mod constants;
mod cube;
mod mesh_build;

pub use chunk::{ChunkMeshCPU, build_chunk_mesh};
pub use constants::{CUBE_HALF_EXTENT, VOXEL_SPACING, voxel_center};
pub use cube::{CUBE_VERTEX_COUNT, cube_vertices, face_vertices};
pub use mesh_build::MeshBuild;
