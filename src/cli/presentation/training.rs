//! Training form presentation for `show`.

use super::{context_label, format_number, format_section_heading, to_pretty_json};
use crate::error::AppError;
use crate::training::TrainingForm;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn format_form_text(context: &str, form: &TrainingForm) -> String {
    let mut out = format!("{}\n\n", format_section_heading(&context_label(context)));
    if form.is_empty() {
        out.push_str("No exercises.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Exercise", "Series", "Reps", "Weight", "Before", "Notes"]);
    for (i, e) in form.trains.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            e.name.clone(),
            cell(e.series.map(format_number)),
            cell(e.reps.map(format_number)),
            cell(e.weight_actual.map(format_number)),
            cell(e.weight_before.map(format_number)),
            e.observations.clone(),
        ]);
    }
    out.push_str(&format!("{}\n\n", table));
    let noun = if form.len() == 1 { "exercise" } else { "exercises" };
    out.push_str(&format!("Total: {} {}.\n", form.len(), noun));
    out
}

pub fn format_form_json(context: &str, form: &TrainingForm) -> Result<String, AppError> {
    to_pretty_json(&serde_json::json!({ "context": context, "trains": form.trains }))
}
