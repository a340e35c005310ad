//! Workspace config files: `<workspace>/config/config.toml`, then
//! `<workspace>/config/<TRAINLOG_ENV>.toml` (default env "development").

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};

/// Workspace config files that exist, base file first.
pub fn workspace_config_paths(workspace_root: &Path) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    let env_name = std::env::var("TRAINLOG_ENV").unwrap_or_else(|_| "development".to_string());

    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env_name)),
    ]
    .into_iter()
    .filter(|path| path.exists())
    .collect()
}

/// Add the workspace config files to `builder`, later files winning.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(workspace_config_paths(workspace_root)
        .into_iter()
        .fold(builder, |builder, path| {
            builder.add_source(File::from(path).required(false))
        }))
}
