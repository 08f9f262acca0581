// src/config.rs

//! Configuration loading utilities.
//!
//! A run's configuration is the TOML file (or defaults when it is missing)
//! with the environment overlaid on top.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Config;

/// Environment variable naming the config file for the serverless handler.
pub const CONFIG_PATH_VAR: &str = "CANVAS_SYNC_CONFIG";

/// Default config file name inside the storage directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load configuration from a TOML file and overlay the environment.
///
/// Falls back to defaults if the file cannot be loaded.
pub fn load_config(path: &Path) -> Result<Config> {
    load_config_with(path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an explicit variable lookup.
pub fn load_config_with<F>(path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if path.exists() {
        Config::load_or_default(path)
    } else {
        log::info!("No config file at {}, using defaults", path.display());
        Config::default()
    };
    config.apply_env_from(lookup)?;
    Ok(config)
}

/// Config path for the serverless handler: `CANVAS_SYNC_CONFIG` or
/// `config.toml` in the working directory.
pub fn lambda_config_path() -> PathBuf {
    std::env::var(CONFIG_PATH_VAR)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}
