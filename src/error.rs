//! Error types for the training log.

use std::path::PathBuf;
use thiserror::Error;

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Corrupt value under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Import/export codec errors
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Invalid import payload: {0}")]
    InvalidPayload(String),

    #[error("Failed to encode export payload: {0}")]
    Encode(String),
}

/// Share sink errors
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to stdout: {0}")]
    Stdout(#[source] std::io::Error),

    #[error("Share rejected: {0}")]
    Rejected(String),
}

/// One failed field of one exercise entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub index: usize,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "exercise {} {}: {}", self.index + 1, self.field, self.message)
    }
}

/// Application-level errors surfaced by the state container and the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Could not read training for context '{context}': {reason}")]
    StorageReadFailed { context: String, reason: String },

    #[error("Invalid JSON. Check the format and try again ({0})")]
    InvalidPayload(String),

    #[error("Could not save training data: {0}")]
    StorageWriteFailed(String),

    #[error("Could not export training data: {0}")]
    ShareFailed(String),

    #[error("Context not found: {0}")]
    ContextNotFound(String),

    #[error("Context already exists: {0}")]
    DuplicateContext(String),

    #[error("Exercise {} not found in context '{context}'", .index + 1)]
    ExerciseNotFound { context: String, index: usize },

    #[error("Invalid training form: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<ShareError> for AppError {
    fn from(err: ShareError) -> Self {
        AppError::ShareFailed(err.to_string())
    }
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        match err {
            TransferError::InvalidPayload(msg) => AppError::InvalidPayload(msg),
            TransferError::Encode(msg) => AppError::ShareFailed(msg),
        }
    }
}
