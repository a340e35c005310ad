//! Share sinks: where an export ends up.

use crate::error::ShareError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination for an exported payload
pub trait ShareSink {
    fn share(&self, title: &str, body: &str) -> Result<(), ShareError>;
}

/// Writes the body to standard output.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl ShareSink for StdoutSink {
    fn share(&self, _title: &str, body: &str) -> Result<(), ShareError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", body).map_err(ShareError::Stdout)
    }
}

/// Writes the body to a file via temp file + rename.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareSink for FileSink {
    fn share(&self, title: &str, body: &str) -> Result<(), ShareError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ShareError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, body).map_err(|source| ShareError::Write {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &self.path).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            ShareError::Write {
                path: self.path.clone(),
                source,
            }
        })?;
        debug!(title, path = %self.path.display(), "Export written");
        Ok(())
    }
}
