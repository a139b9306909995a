//! Block and material crate.
#![forbid(unsafe_code)]

pub mod material;
pub mod types;

pub use material::{CatalogError, Material, MaterialCatalog};
pub use types::{Block, MaterialId};
