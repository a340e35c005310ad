//! CLI domain: parse, route, help, output, and presentation only.
//! Training logic lives in `app`; the route table only dispatches to it.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, ContextCommands, ExerciseCommands, ExerciseFields};
pub use presentation::{
    format_context_list_json, format_context_list_text, format_dashboard_json,
    format_dashboard_text, format_form_json, format_form_text,
};
pub use route::RunContext;
