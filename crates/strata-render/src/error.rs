use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Encoded image bytes could not be decoded or uploaded.
    #[error("texture decode failed: {reason}")]
    TextureDecode { reason: String },
    #[error("geometry upload failed: {reason}")]
    GeometryUpload { reason: String },
    /// Window, context, or shader program could not be set up.
    #[error("backend setup failed: {reason}")]
    Setup { reason: String },
}
