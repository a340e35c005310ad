//! CLI command names used for log spans.

use crate::cli::parse::{Commands, ContextCommands, ExerciseCommands};

/// Command name string for logging (e.g. "contexts.add", "dashboard").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Contexts { command } => format!("contexts.{}", context_command_name(command)),
        Commands::Show { .. } => "show".to_string(),
        Commands::Exercise { command } => format!("exercise.{}", exercise_command_name(command)),
        Commands::Dashboard { .. } => "dashboard".to_string(),
        Commands::Export { .. } => "export".to_string(),
        Commands::Import { .. } => "import".to_string(),
        Commands::Config => "config".to_string(),
    }
}

pub fn context_command_name(command: &ContextCommands) -> &'static str {
    match command {
        ContextCommands::List { .. } => "list",
        ContextCommands::Add { .. } => "add",
        ContextCommands::Remove { .. } => "remove",
    }
}

pub fn exercise_command_name(command: &ExerciseCommands) -> &'static str {
    match command {
        ExerciseCommands::Add { .. } => "add",
        ExerciseCommands::Edit { .. } => "edit",
        ExerciseCommands::Remove { .. } => "remove",
    }
}
