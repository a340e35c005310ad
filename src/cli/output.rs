//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::AppError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &AppError) -> String {
    match e {
        AppError::Validation(errors) => {
            let mut out = String::from("Training not saved, fix these fields:");
            for err in errors {
                out.push_str(&format!("\n  - {}", err));
            }
            out
        }
        other => format!("Error: {}", other),
    }
}
