use std::path::{Path, PathBuf};

use strata_runtime::CATALOG_RELATIVE_PATH;

pub const ASSETS_ENV: &str = "STRATA_ASSETS";

pub fn resolve_assets_root(cli: Option<PathBuf>) -> PathBuf {
    // Precedence: CLI flag -> STRATA_ASSETS env -> search nearby dirs -> CWD
    if let Some(pb) = cli {
        if pb.exists() {
            return pb;
        }
        log::warn!("assets root {} does not exist, searching", pb.display());
    }
    if let Ok(p) = std::env::var(ASSETS_ENV) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return pb;
        }
    }
    // Search candidates: CWD, executable dir, crate root; climb up to 5 parents
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        if let Some(found) = search_upward(&base, 5) {
            return found;
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// First of `base` and its parents (up to `depth` levels) holding the catalog.
fn search_upward(base: &Path, depth: usize) -> Option<PathBuf> {
    let mut cur = base.to_path_buf();
    for _ in 0..depth {
        if cur.join(CATALOG_RELATIVE_PATH).exists() {
            return Some(cur);
        }
        cur = cur.parent()?.to_path_buf();
    }
    None
}

pub fn worldgen_path(root: &Path) -> PathBuf {
    root.join("assets/worldgen.toml")
}
