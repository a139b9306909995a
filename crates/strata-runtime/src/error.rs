use strata_blocks::CatalogError;
use strata_chunk::{GenError, ResourceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("world generation failed")]
    Generation(#[from] GenError),
    #[error("geometry upload failed")]
    Geometry(#[source] ResourceError),
    #[error("material catalog could not be loaded")]
    Catalog(#[from] CatalogError),
}
