use std::path::PathBuf;

use strata_render::BackendError;
use strata_world::ChunkCoord;
use thiserror::Error;

/// A material's backing texture or geometry could not be created.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("no material named `{key}` in the catalog")]
    UnknownMaterial { key: String },
    #[error("material `{material}` has no texture path")]
    NoTexture { material: String },
    #[error("texture for material `{material}` not readable at {path}")]
    MissingAsset {
        material: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to upload texture for material `{material}`")]
    TextureUpload {
        material: String,
        #[source]
        source: BackendError,
    },
    #[error("failed to upload geometry for {what}")]
    GeometryUpload {
        what: String,
        #[source]
        source: BackendError,
    },
}

impl ResourceError {
    /// Material key involved in the failure, when there is one.
    pub fn material(&self) -> Option<&str> {
        match self {
            ResourceError::UnknownMaterial { key } => Some(key),
            ResourceError::NoTexture { material }
            | ResourceError::MissingAsset { material, .. }
            | ResourceError::TextureUpload { material, .. } => Some(material),
            ResourceError::GeometryUpload { .. } => None,
        }
    }
}

/// Chunk construction failed; nothing from the chunk is kept.
#[derive(Debug, Error)]
#[error("generating chunk {coord} failed")]
pub struct GenError {
    pub coord: ChunkCoord,
    #[source]
    pub source: ResourceError,
}
