//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/cmdkit/config.toml` (lowest priority)
//! 2. `~/.config/cmdkit/config.toml`
//! 3. `~/.cmdkit.toml`
//! 4. `./.cmdkit.toml`
//! 5. `--config <path>`
//! 6. `CMDKIT_*` environment variables (highest priority)

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "cmdkit";

/// Prefix of configuration environment variables
const ENV_PREFIX: &str = "CMDKIT_";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    paths
}

/// Expand `~` in a user-supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Load configuration with XDG layering
///
/// Later files override earlier ones. Environment variables with prefix
/// `CMDKIT_` override all file-based configuration, e.g.
/// `CMDKIT_EXEC__CHUNK_SIZE=64` sets `exec.chunk_size`.
pub fn load_config(override_path: Option<&str>) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    for path in config_paths() {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    if let Some(path) = override_path {
        let path = expand_path(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Find all existing config files (for debugging/introspection)
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.exists()).collect()
}
