//! trainlog: workout contexts, exercise logs, progress summaries and JSON
//! backup over a key-value store.

pub mod app;
pub mod cli;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod share;
pub mod store;
pub mod summary;
pub mod training;
pub mod transfer;

pub use app::TrainingApp;
pub use error::AppError;
