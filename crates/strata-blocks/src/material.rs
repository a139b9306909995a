use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::types::MaterialId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read material catalog {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse material catalog")]
    Parse(#[from] toml::de::Error),
    #[error("material `{0}` lists no texture paths")]
    NoTextures(String),
    #[error("material `{key}` exceeds the {max} material limit")]
    TooMany { key: String, max: usize },
}

#[derive(Clone, Debug)]
pub struct Material {
    pub id: MaterialId,
    pub key: String,
    pub texture_candidates: Vec<PathBuf>,
}

impl Material {
    /// First candidate that exists under `root`, else the first candidate.
    pub fn texture_path(&self, root: &Path) -> Option<PathBuf> {
        let joined: Vec<PathBuf> = self
            .texture_candidates
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { root.join(p) })
            .collect();
        joined
            .iter()
            .find(|p| p.exists())
            .cloned()
            .or_else(|| joined.first().cloned())
    }
}

#[derive(Default, Clone, Debug)]
pub struct MaterialCatalog {
    pub materials: Vec<Material>,
    pub by_key: HashMap<String, MaterialId>,
}

impl MaterialCatalog {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn get_id(&self, key: &str) -> Option<MaterialId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Registers a material programmatically; returns the existing id if the key is known.
    pub fn insert(&mut self, key: &str, paths: Vec<PathBuf>) -> Result<MaterialId, CatalogError> {
        if let Some(id) = self.get_id(key) {
            return Ok(id);
        }
        let id = u16::try_from(self.materials.len())
            .map(MaterialId)
            .map_err(|_| CatalogError::TooMany {
                key: key.to_string(),
                max: usize::from(u16::MAX) + 1,
            })?;
        self.by_key.insert(key.to_string(), id);
        self.materials.push(Material {
            id,
            key: key.to_string(),
            texture_candidates: paths,
        });
        Ok(id)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, CatalogError> {
        let cfg: MaterialsConfig = toml::from_str(toml_str)?;
        let mut catalog = MaterialCatalog::new();
        let mut entries: Vec<(String, MaterialEntry)> = cfg.materials.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so MaterialId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, entry) in entries {
            let paths = match entry {
                MaterialEntry::Paths(v) => v,
                MaterialEntry::Detail { paths } => paths,
            };
            if paths.is_empty() {
                return Err(CatalogError::NoTextures(key));
            }
            catalog.insert(&key, paths.into_iter().map(PathBuf::from).collect())?;
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct MaterialsConfig {
    pub materials: HashMap<String, MaterialEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum MaterialEntry {
    // Simple: material = ["assets/blocks/foo.png", ...]
    Paths(Vec<String>),
    // Detailed: material = { paths = ["..."] }
    Detail { paths: Vec<String> },
}
