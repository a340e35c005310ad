//! Merge rules: defaults, override order, conflict handling.

use crate::app::DEFAULT_EXPORT_TITLE;
use crate::config::{default_store_path, DEFAULT_CONTEXTS};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources replace whole values; lists such as
/// `registry.default_contexts` are not concatenated.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default(
            "storage.path",
            default_store_path().to_string_lossy().to_string(),
        )?
        .set_default(
            "registry.default_contexts",
            DEFAULT_CONTEXTS
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<String>>(),
        )?
        .set_default("export.title", DEFAULT_EXPORT_TITLE)
}
