//! Configuration and file management for podloom
//!
//! This crate provides:
//! - Platform config directory resolution
//! - Configuration file loading (TOML)
//! - Backend endpoint configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::load_config_file;
pub use paths::{app_config_location, app_config_path, config_dir};
