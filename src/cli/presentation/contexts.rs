//! Context list presentation.

use super::{context_label, to_pretty_json};
use crate::error::AppError;
use crate::training::ContextId;
use serde_json::json;

pub fn format_context_list_text(ids: &[ContextId]) -> String {
    if ids.is_empty() {
        return "No contexts.".to_string();
    }
    let mut lines: Vec<String> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| format!("  {}. {}", i + 1, context_label(id)))
        .collect();
    lines.insert(0, "Contexts:".to_string());
    lines.join("\n")
}

pub fn format_context_list_json(ids: &[ContextId]) -> Result<String, AppError> {
    to_pretty_json(&json!({ "contexts": ids }))
}
