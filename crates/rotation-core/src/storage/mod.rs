mod config;

pub use config::{CatalogConfig, Config, LogConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/rotation-builder[-dev]/` based on ROTATION_BUILDER_ENV.
///
/// Set ROTATION_BUILDER_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ROTATION_BUILDER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("rotation-builder-dev")
    } else {
        base_dir.join("rotation-builder")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::NoDataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
