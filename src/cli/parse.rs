//! CLI parse: clap types for trainlog. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// trainlog CLI - workout contexts, exercise logs and progress summaries
#[derive(Parser)]
#[command(name = "trainlog")]
#[command(about = "Track workouts per training context, with progress summaries and JSON backup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (workspace config and relative store paths)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Store directory (overrides storage.path)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, short = 'q', default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage training contexts (A, B, C, ...)
    Contexts {
        #[command(subcommand)]
        command: ContextCommands,
    },
    /// Show the exercises of one context
    Show {
        /// Context identifier
        context: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add, edit or remove exercises
    Exercise {
        #[command(subcommand)]
        command: ExerciseCommands,
    },
    /// Summary and progress across all contexts
    Dashboard {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Export every context as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Import a JSON export (or a bare context map); "-" reads stdin
    Import {
        /// Path of the JSON payload
        input: PathBuf,
    },
    /// Show the effective configuration as TOML
    Config,
}

#[derive(Subcommand)]
pub enum ContextCommands {
    /// List contexts in order
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Add a context (next free letter unless --name is given)
    Add {
        /// Explicit context name
        #[arg(long)]
        name: Option<String>,
    },
    /// Remove a context and its stored exercises
    Remove {
        /// Context identifier
        context: String,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Exercise field values; every field is optional so the same set serves
/// add (missing fields stay empty and fail validation) and edit (missing
/// fields are left as they are).
#[derive(Args, Debug, Clone, Default)]
pub struct ExerciseFields {
    /// Exercise name
    #[arg(long)]
    pub name: Option<String>,
    /// Repetitions per series
    #[arg(long, allow_negative_numbers = true)]
    pub reps: Option<f64>,
    /// Number of series
    #[arg(long, allow_negative_numbers = true)]
    pub series: Option<f64>,
    /// Current weight
    #[arg(long = "weight", allow_negative_numbers = true)]
    pub weight_actual: Option<f64>,
    /// Previous weight
    #[arg(long = "before", allow_negative_numbers = true)]
    pub weight_before: Option<f64>,
    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ExerciseCommands {
    /// Append an exercise to a context
    Add {
        /// Context identifier
        context: String,
        #[command(flatten)]
        fields: ExerciseFields,
    },
    /// Change fields of an exercise (positions start at 1)
    Edit {
        /// Context identifier
        context: String,
        /// Exercise position as shown by `show`
        position: usize,
        #[command(flatten)]
        fields: ExerciseFields,
    },
    /// Remove an exercise (positions start at 1)
    Remove {
        /// Context identifier
        context: String,
        /// Exercise position as shown by `show`
        position: usize,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}
