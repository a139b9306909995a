use std::path::{Path, PathBuf};

use strata_blocks::MaterialCatalog;

use crate::error::WorldError;

/// Catalog location under the assets root.
pub const CATALOG_RELATIVE_PATH: &str = "assets/voxels/materials.toml";

/// Material catalog plus the directory its texture paths are relative to.
#[derive(Clone, Debug)]
pub struct AssetSource {
    root: PathBuf,
    catalog: MaterialCatalog,
}

impl AssetSource {
    pub fn new(root: impl Into<PathBuf>, catalog: MaterialCatalog) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    /// Reads `assets/voxels/materials.toml` under `root`.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, WorldError> {
        let root = root.into();
        let catalog = MaterialCatalog::from_path(root.join(CATALOG_RELATIVE_PATH))?;
        log::info!(
            "loaded {} materials from {}",
            catalog.len(),
            root.join(CATALOG_RELATIVE_PATH).display()
        );
        Ok(Self { root, catalog })
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }
}
