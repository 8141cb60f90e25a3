use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".podloom.toml";

/// Load config file content, searching in order:
/// 1. `.podloom.toml` in the current working directory
/// 2. `.podloom.toml` in the home directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the file content if found, None otherwise. Reading never
/// creates any directory.
pub fn load_config_file() -> Option<String> {
    read_first(&candidate_paths())
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    paths.extend(get_home_config_path());
    paths.extend(crate::paths::app_config_location());
    paths
}

fn read_first(paths: &[PathBuf]) -> Option<String> {
    paths.iter().find_map(|path| {
        let content = std::fs::read_to_string(path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

/// Returns ~/.podloom.toml if HOME environment variable is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
