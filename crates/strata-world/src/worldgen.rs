use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read worldgen config {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse worldgen config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid worldgen config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub water: Water,
    #[serde(default)]
    pub render: Render,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_seed")]
    pub seed: i32,
    #[serde(default = "default_chunks")]
    pub chunks_x: usize,
    #[serde(default = "default_chunks")]
    pub chunks_z: usize,
    #[serde(default = "default_chunk_width")]
    pub chunk_width: usize,
    #[serde(default = "default_chunk_height")]
    pub chunk_height: usize,
}
fn default_seed() -> i32 {
    1000
}
fn default_chunks() -> usize {
    1
}
fn default_chunk_width() -> usize {
    16
}
fn default_chunk_height() -> usize {
    32
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            chunks_x: default_chunks(),
            chunks_z: default_chunks(),
            chunk_width: default_chunk_width(),
            chunk_height: default_chunk_height(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    /// World units per noise unit along x and z.
    #[serde(default = "default_height_scale")]
    pub scale: f32,
}
fn default_height_scale() -> f32 {
    20.0
}
impl Default for Height {
    fn default() -> Self {
        Self {
            scale: default_height_scale(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_subsurface_depth")]
    pub subsurface_depth: i32,
    #[serde(default = "default_top")]
    pub top: String,
    #[serde(default = "default_subsurface")]
    pub subsurface: String,
    #[serde(default = "default_liquid")]
    pub liquid: String,
    #[serde(default = "default_rock")]
    pub rock: String,
}
fn default_subsurface_depth() -> i32 {
    4
}
fn default_top() -> String {
    "grass".into()
}
fn default_subsurface() -> String {
    "dirt".into()
}
fn default_liquid() -> String {
    "water".into()
}
fn default_rock() -> String {
    "stone".into()
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            subsurface_depth: default_subsurface_depth(),
            top: default_top(),
            subsurface: default_subsurface(),
            liquid: default_liquid(),
            rock: default_rock(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Water {
    #[serde(default = "default_water_level")]
    pub level: i32,
}
fn default_water_level() -> i32 {
    20
}
impl Default for Water {
    fn default() -> Self {
        Self {
            level: default_water_level(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One geometry buffer per chunk per material, faces culled individually.
    #[default]
    Batched,
    /// One draw per visible voxel sharing a single cube geometry.
    PerVoxel,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Render {
    #[serde(default)]
    pub mode: RenderMode,
    /// Consult horizontally adjacent chunks before exposing a boundary voxel.
    #[serde(default)]
    pub cross_chunk_culling: bool,
}

/// Layer material keys, resolved against the material catalog at world build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerNames {
    pub surface: String,
    pub subsurface: String,
    pub liquid: String,
    pub rock: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub chunk_width: usize,
    pub chunk_height: usize,
    pub horizontal_scale: f32,
    pub water_level: i32,
    pub subsurface_depth: i32,
    pub layers: LayerNames,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            chunk_width: cfg.world.chunk_width,
            chunk_height: cfg.world.chunk_height,
            horizontal_scale: cfg.height.scale,
            water_level: cfg.water.level,
            subsurface_depth: cfg.surface.subsurface_depth,
            layers: LayerNames {
                surface: cfg.surface.top.clone(),
                subsurface: cfg.surface.subsurface.clone(),
                liquid: cfg.surface.liquid.clone(),
                rock: cfg.surface.rock.clone(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_width == 0 || self.chunk_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "chunk dimensions must be positive, got {}x{}",
                self.chunk_width, self.chunk_height
            )));
        }
        if !(self.horizontal_scale.is_finite() && self.horizontal_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "height.scale must be a positive number, got {}",
                self.horizontal_scale
            )));
        }
        if self.subsurface_depth < 0 {
            return Err(ConfigError::Invalid(format!(
                "surface.subsurface_depth must not be negative, got {}",
                self.subsurface_depth
            )));
        }
        Ok(())
    }
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: WorldGenConfig = toml::from_str(s)?;
        if cfg.world.chunks_x == 0 || cfg.world.chunks_z == 0 {
            return Err(ConfigError::Invalid(format!(
                "world size must be at least 1x1 chunks, got {}x{}",
                cfg.world.chunks_x, cfg.world.chunks_z
            )));
        }
        WorldGenParams::from_config(&cfg).validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}
