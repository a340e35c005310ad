//! Configuration System
//!
//! Layered configuration for the training log: built-in defaults, user and
//! workspace TOML files, then environment overrides. Validated before use.

use crate::app::DEFAULT_EXPORT_TITLE;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Contexts a fresh install starts with.
pub const DEFAULT_CONTEXTS: [&str; 3] = ["A", "B", "C"];

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainlogConfig {
    /// Where the key-value store lives
    #[serde(default)]
    pub storage: StorageConfig,

    /// Context registry settings
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store directory; relative paths resolve against the workspace root
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

/// Default store directory under the platform data dir.
pub fn default_store_path() -> PathBuf {
    match directories::ProjectDirs::from("", "", "trainlog") {
        Some(dirs) => dirs.data_dir().join("store"),
        None => PathBuf::from(".trainlog").join("store"),
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl StorageConfig {
    /// Absolute store path for `workspace_root`.
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workspace_root.join(&self.path)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Contexts used when no registry has been stored yet
    #[serde(default = "default_contexts")]
    pub default_contexts: Vec<String>,
}

fn default_contexts() -> Vec<String> {
    DEFAULT_CONTEXTS.iter().map(|s| s.to_string()).collect()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_contexts: default_contexts(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Title passed to the share sink
    #[serde(default = "default_export_title")]
    pub title: String,
}

fn default_export_title() -> String {
    DEFAULT_EXPORT_TITLE.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: default_export_title(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Storage(String),
    Registry(String),
    Export(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Registry(msg) => write!(f, "Registry: {}", msg),
            ValidationError::Export(msg) => write!(f, "Export: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TrainlogConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.storage.path.as_os_str().is_empty() {
            errors.push(ValidationError::Storage(
                "Store path cannot be empty".to_string(),
            ));
        }

        let contexts = &self.registry.default_contexts;
        if contexts.is_empty() {
            errors.push(ValidationError::Registry(
                "At least one default context is required".to_string(),
            ));
        }
        for (i, ctx) in contexts.iter().enumerate() {
            if ctx.trim().is_empty() {
                errors.push(ValidationError::Registry(format!(
                    "Default context {} is blank",
                    i + 1
                )));
            } else if contexts[..i].contains(ctx) {
                errors.push(ValidationError::Registry(format!(
                    "Duplicate default context '{}'",
                    ctx
                )));
            }
        }

        if self.export.title.trim().is_empty() {
            errors.push(ValidationError::Export(
                "Export title cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
