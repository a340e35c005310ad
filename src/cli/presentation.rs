//! CLI presentation: text and json formatters per command family.

mod contexts;
mod dashboard;
mod training;

pub use contexts::{format_context_list_json, format_context_list_text};
pub use dashboard::{format_dashboard_json, format_dashboard_text};
pub use training::{format_form_json, format_form_text};

use crate::error::AppError;
use crate::registry::NUMBERED_PREFIX;
use owo_colors::OwoColorize;
use serde::Serialize;

fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::ConfigError(e.to_string()))
}

/// Display label for a context: bare letters read as "Treino A".
fn context_label(id: &str) -> String {
    if id.chars().count() == 1 {
        format!("{}{}", NUMBERED_PREFIX, id)
    } else {
        id.to_string()
    }
}

/// Number for display: integers without decimals, others with one.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
