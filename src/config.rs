//! Worldgen config file plus command-line overrides.

use std::path::Path;

use strata_render_raylib::WindowConfig;
use strata_world::{ConfigError, WorldGenConfig, WorldGenParams};

use crate::Cli;
use crate::assets::worldgen_path;

/// Reads `--world-config`, else `assets/worldgen.toml` under `root` when it
/// exists, else built-in defaults. CLI values win over the file.
pub fn load_worldgen(cli: &Cli, root: &Path) -> Result<WorldGenConfig, ConfigError> {
    let mut cfg = match &cli.world_config {
        Some(path) => {
            log::info!("worldgen config: {}", path.display());
            WorldGenConfig::from_path(path)?
        }
        None => {
            let path = worldgen_path(root);
            if path.exists() {
                log::info!("worldgen config: {}", path.display());
                WorldGenConfig::from_path(&path)?
            } else {
                log::info!("no worldgen config at {}, using defaults", path.display());
                WorldGenConfig::default()
            }
        }
    };
    apply_overrides(&mut cfg, cli);
    WorldGenParams::from_config(&cfg).validate()?;
    Ok(cfg)
}

pub fn apply_overrides(cfg: &mut WorldGenConfig, cli: &Cli) {
    if let Some(seed) = cli.seed {
        cfg.world.seed = seed;
    }
    if let Some(n) = cli.chunks_x {
        cfg.world.chunks_x = n as usize;
    }
    if let Some(n) = cli.chunks_z {
        cfg.world.chunks_z = n as usize;
    }
    if let Some(mode) = cli.render_mode {
        cfg.render.mode = mode.into();
    }
    if cli.cross_chunk_culling {
        cfg.render.cross_chunk_culling = true;
    }
}

pub fn window_config(cli: &Cli) -> WindowConfig {
    WindowConfig {
        width: cli.width,
        height: cli.height,
        title: "strata".to_string(),
        show_fps: !cli.hide_fps,
        ..WindowConfig::default()
    }
}
