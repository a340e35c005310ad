//! Config loader facade: one entry point that stacks every source.

use crate::config::merge::merge_policy;
use crate::config::sources::{global_file, workspace_file};
use crate::config::TrainlogConfig;
use config::{ConfigError, Environment, File};
use std::path::{Path, PathBuf};

/// Loads `TrainlogConfig` from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace_root`.
    ///
    /// Precedence (lowest to highest): defaults, user config file, workspace
    /// `config/config.toml`, workspace `config/{TRAINLOG_ENV}.toml`,
    /// `TRAINLOG__SECTION__KEY` environment variables.
    pub fn load(workspace_root: &Path) -> Result<TrainlogConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        builder
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from one explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<TrainlogConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Path of the user-level config file, if a home directory is known.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn environment() -> Environment {
        Environment::with_prefix("TRAINLOG")
            .prefix_separator("__")
            .separator("__")
    }
}
