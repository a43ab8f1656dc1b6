//! Locates the configuration for a check target.
//!
//! Lookup order:
//!
//! 1. `--config` flag
//! 2. `mnd.toml`, then `.mnd.toml`, in the target directory and each parent
//!    up to the Go module root (the first directory holding `go.mod`)
//! 3. `config.toml` in `$MND_CONFIG_DIR` or `~/.mnd/`
//! 4. Built-in defaults
//!
//! A file target is looked up from its directory.

use anyhow::{Context, Result};
use mnd_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Project config names, checked in order within each directory.
const PROJECT_CONFIG_NAMES: &[&str] = &["mnd.toml", ".mnd.toml"];

/// Marks the root of a Go module; the upward search ends there.
const MODULE_MARKER: &str = "go.mod";

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Loads the configuration that applies to `target`.
///
/// # Errors
///
/// Returns an error if the selected file cannot be read or is invalid. An
/// explicit path that does not exist is an error.
pub fn load(target: &Path, explicit: Option<&Path>) -> Result<Config> {
    load_with_global(target, explicit, global_config_dir().as_deref())
}

fn load_with_global(
    target: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> Result<Config> {
    let Some(path) = locate(target, explicit, global_dir) else {
        debug!("No config file found, using defaults");
        return Ok(Config::default());
    };
    info!("Using config: {}", path.display());
    Config::from_file(&path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn locate(target: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let target = target
        .canonicalize()
        .unwrap_or_else(|_| target.to_path_buf());
    let start = if target.is_file() {
        target.parent().unwrap_or(&target)
    } else {
        &target
    };

    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(MODULE_MARKER).is_file() {
            debug!("Reached module root {} without a config", dir.display());
            break;
        }
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.is_file())
}

/// `$MND_CONFIG_DIR`, else `~/.mnd/`.
fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("MND_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".mnd"))
}
