//! Dashboard presentation: load summary and progress tables.

use super::{context_label, format_number, format_section_heading, to_pretty_json};
use crate::error::AppError;
use crate::summary::{ProgressReport, Summary};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn format_delta(delta: f64) -> String {
    let text = format!("{:+.1}", delta);
    if delta > 0.0 {
        text.green().to_string()
    } else if delta < 0.0 {
        text.red().to_string()
    } else {
        text
    }
}

pub fn format_dashboard_text(summary: &Summary, progress: &ProgressReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Dashboard")));
    out.push_str(&format!(
        "Exercises: {}   Series: {}   Reps: {}   Estimated load: {} kg\n\n",
        summary.totals.exercises,
        format_number(summary.totals.series),
        format_number(summary.totals.reps),
        summary.totals.volume.round()
    ));

    if summary.per_context.is_empty() {
        out.push_str("No contexts.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Context", "Exercises", "Series", "Reps", "Load (kg)"]);
    for row in &summary.per_context {
        table.add_row(vec![
            context_label(&row.context),
            row.exercises.to_string(),
            format_number(row.series),
            format_number(row.reps),
            format_number(row.volume.round()),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!("{}\n\n", format_section_heading("Progress")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Context", "Improved", "Regressed", "Unchanged", "Avg delta"]);
    for row in &progress.per_context {
        table.add_row(vec![
            context_label(&row.context),
            row.improved.to_string(),
            row.regressed.to_string(),
            row.unchanged.to_string(),
            format_delta(row.avg_delta),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Overall: {} improved, {} regressed, {} unchanged, average delta {} kg.\n",
        progress.totals.improved,
        progress.totals.regressed,
        progress.totals.unchanged,
        format_delta(progress.totals.avg_delta)
    ));
    out
}

pub fn format_dashboard_json(summary: &Summary, progress: &ProgressReport) -> Result<String, AppError> {
    to_pretty_json(&json!({ "summary": summary, "progress": progress }))
}
