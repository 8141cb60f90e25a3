//! Configuration directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/podloom/`
//! - macOS: `~/Library/Application Support/podloom/`
//! - Windows: `%APPDATA%\podloom\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "podloom";

const APP_CONFIG_FILE: &str = "config.toml";

/// Get the application config directory, creating it if needed
/// Returns ~/.config/podloom/ on Linux, ~/Library/Application Support/podloom/ on macOS
pub fn config_dir() -> Result<PathBuf> {
    let dir = config_dir_location().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get path to app config file, creating its directory
pub fn app_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(APP_CONFIG_FILE))
}

/// Where the app config file would live. Touches nothing on disk.
pub fn app_config_location() -> Option<PathBuf> {
    config_dir_location().map(|dir| dir.join(APP_CONFIG_FILE))
}

fn config_dir_location() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}
