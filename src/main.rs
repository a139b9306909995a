mod app;
mod assets;
mod camera;
mod config;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use strata_render_raylib::RaylibPlatform;
use strata_runtime::{AssetSource, WorldOptions};
use strata_world::{RenderMode, TerrainGen, WorldGenParams};

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Procedural voxel terrain with a free-look camera")]
pub struct Cli {
    /// Worldgen TOML; defaults to assets/worldgen.toml under the assets root
    #[arg(long)]
    pub world_config: Option<PathBuf>,
    /// Directory containing assets/ (else STRATA_ASSETS, else searched)
    #[arg(long)]
    pub assets_root: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<i32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub chunks_x: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub chunks_z: Option<u32>,
    #[arg(long, value_enum)]
    pub render_mode: Option<RenderModeArg>,
    /// Hide voxels whose only open side faces a neighbouring chunk
    #[arg(long)]
    pub cross_chunk_culling: bool,
    #[arg(long, default_value_t = 800)]
    pub width: i32,
    #[arg(long, default_value_t = 600)]
    pub height: i32,
    #[arg(long)]
    pub hide_fps: bool,
    /// env_logger filter, e.g. `debug` or `strata_runtime=trace`; overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderModeArg {
    Batched,
    PerVoxel,
}

impl From<RenderModeArg> for RenderMode {
    fn from(m: RenderModeArg) -> Self {
        match m {
            RenderModeArg::Batched => RenderMode::Batched,
            RenderModeArg::PerVoxel => RenderMode::PerVoxel,
        }
    }
}

fn init_logging(filter: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(f) = filter {
        builder.parse_filters(f);
    }
    builder.format_timestamp_millis().init();
}

/// `outer: cause: root cause`
fn report(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let root = assets::resolve_assets_root(cli.assets_root.clone());
    log::info!("assets root: {}", root.display());
    let cfg = config::load_worldgen(&cli, &root)?;
    let assets = AssetSource::load(root)?;
    let terrain = TerrainGen::new(cfg.world.seed, WorldGenParams::from_config(&cfg));

    let platform = RaylibPlatform::open(&config::window_config(&cli))?;
    let aspect = platform.aspect();
    let mut app = App::new(platform, terrain, WorldOptions::from_config(&cfg), &assets, aspect)?;
    app.run();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", report(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_walks_the_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = strata_world::ConfigError::Read {
            path: PathBuf::from("worldgen.toml"),
            source: io,
        };
        assert_eq!(
            report(&err),
            "failed to read worldgen config worldgen.toml: no such file"
        );
    }

    #[test]
    fn render_mode_arg_maps_both_ways() {
        assert_eq!(RenderMode::from(RenderModeArg::Batched), RenderMode::Batched);
        assert_eq!(RenderMode::from(RenderModeArg::PerVoxel), RenderMode::PerVoxel);
    }
}
