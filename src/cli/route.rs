//! CLI route: single route table and run context. Dispatches to the training
//! app and presentation.

use crate::app::TrainingApp;
use crate::config::{ConfigLoader, TrainlogConfig};
use crate::error::AppError;
use crate::share::{FileSink, StdoutSink};
use crate::store::SledStore;
use crate::training::Exercise;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span};

use crate::cli::command_name;
use crate::cli::parse::{Commands, ContextCommands, ExerciseCommands, ExerciseFields};
use crate::cli::presentation::{
    format_context_list_json, format_context_list_text, format_dashboard_json,
    format_dashboard_text, format_form_json, format_form_text,
};

/// Runtime context for CLI execution: resolved config, store path and the
/// training app over the sled store.
pub struct RunContext {
    app: TrainingApp<SledStore>,
    config: TrainlogConfig,
    store_path: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root, optional config path and
    /// optional store directory override.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        store_override: Option<PathBuf>,
    ) -> Result<Self, AppError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if let Some(store) = store_override {
            config.storage.path = store;
        }
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AppError::ConfigError(format!("Invalid configuration: {}", messages.join("; ")))
        })?;

        let store_path = config.storage.resolve_path(&workspace_root);
        std::fs::create_dir_all(&store_path)
            .map_err(|e| AppError::StorageError(crate::error::StorageError::IoError(e)))?;
        let store = Arc::new(SledStore::new(&store_path)?);
        debug!(path = %store_path.display(), "Store opened");

        let mut app = TrainingApp::new(store, config.registry.default_contexts.clone())
            .with_export_title(config.export.title.clone());
        app.load_registry()?;

        Ok(Self {
            app,
            config,
            store_path,
        })
    }

    pub fn app(&self) -> &TrainingApp<SledStore> {
        &self.app
    }

    pub fn config(&self) -> &TrainlogConfig {
        &self.config
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Execute a command and return its stdout text.
    pub fn execute(&mut self, command: &Commands) -> Result<String, AppError> {
        let name = command_name(command);
        let span = info_span!("command", name = %name);
        let _enter = span.enter();
        let started = Instant::now();

        let result = self.dispatch(command);
        match &result {
            Ok(_) => info!(
                duration_ms = started.elapsed().as_millis() as u64,
                "Command finished"
            ),
            Err(e) => info!(
                duration_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Command failed"
            ),
        }
        result
    }

    fn dispatch(&mut self, command: &Commands) -> Result<String, AppError> {
        match command {
            Commands::Contexts { command } => self.handle_contexts(command),
            Commands::Show { context, format } => {
                let form = self.app.load_form(context)?;
                match format.as_str() {
                    "json" => format_form_json(context, form),
                    _ => Ok(format_form_text(context, form)),
                }
            }
            Commands::Exercise { command } => self.handle_exercise(command),
            Commands::Dashboard { format } => {
                self.app.load_all()?;
                let summary = self.app.summary();
                let progress = self.app.progress();
                match format.as_str() {
                    "json" => format_dashboard_json(&summary, &progress),
                    _ => Ok(format_dashboard_text(&summary, &progress)),
                }
            }
            Commands::Export { output } => {
                self.app.load_all()?;
                match output {
                    Some(path) => {
                        self.app.export(&FileSink::new(path))?;
                        Ok(format!(
                            "Exported {} contexts to {}",
                            self.app.context_ids().len(),
                            path.display()
                        ))
                    }
                    None => {
                        self.app.export(&StdoutSink)?;
                        Ok(String::new())
                    }
                }
            }
            Commands::Import { input } => {
                let raw = read_input(input)?;
                let data = self.app.import(&raw)?;
                let exercises: usize = data.values().map(|form| form.len()).sum();
                Ok(format!(
                    "Imported {} exercises into {} contexts",
                    exercises,
                    data.len()
                ))
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| AppError::ConfigError(format!("Failed to render config: {}", e))),
        }
    }

    fn handle_contexts(&mut self, command: &ContextCommands) -> Result<String, AppError> {
        match command {
            ContextCommands::List { format } => match format.as_str() {
                "json" => format_context_list_json(self.app.context_ids()),
                _ => Ok(format_context_list_text(self.app.context_ids())),
            },
            ContextCommands::Add { name } => {
                let id = match name {
                    Some(name) => self.app.add_named_context(name)?,
                    None => self.app.add_context()?,
                };
                Ok(format!("Added context '{}'", id))
            }
            ContextCommands::Remove { context, yes } => {
                if !*yes && !confirm(&format!("Remove context '{}' and its exercises?", context))? {
                    return Ok("Removal cancelled".to_string());
                }
                self.app.remove_context(context)?;
                Ok(format!("Removed context '{}'", context))
            }
        }
    }

    fn handle_exercise(&mut self, command: &ExerciseCommands) -> Result<String, AppError> {
        match command {
            ExerciseCommands::Add { context, fields } => {
                let mut exercise = Exercise::empty();
                apply_fields(&mut exercise, fields);
                let index = self.app.add_exercise(context, exercise)?;
                Ok(format!("Added exercise {} to context '{}'", index + 1, context))
            }
            ExerciseCommands::Edit {
                context,
                position,
                fields,
            } => {
                let index = position_to_index(context, *position)?;
                let edited = self
                    .app
                    .edit_exercise(context, index, |e| apply_fields(e, fields))?;
                Ok(format!(
                    "Updated exercise {} ({}) in context '{}'",
                    position, edited.name, context
                ))
            }
            ExerciseCommands::Remove {
                context,
                position,
                yes,
            } => {
                let index = position_to_index(context, *position)?;
                if !*yes && !confirm(&format!("Remove exercise {} from '{}'?", position, context))? {
                    return Ok("Removal cancelled".to_string());
                }
                let removed = self.app.remove_exercise(context, index)?;
                Ok(format!(
                    "Removed exercise {} ({}) from context '{}'",
                    position, removed.name, context
                ))
            }
        }
    }
}

fn apply_fields(exercise: &mut Exercise, fields: &ExerciseFields) {
    if let Some(ref name) = fields.name {
        exercise.name = name.clone();
    }
    if fields.reps.is_some() {
        exercise.reps = fields.reps;
    }
    if fields.series.is_some() {
        exercise.series = fields.series;
    }
    if fields.weight_actual.is_some() {
        exercise.weight_actual = fields.weight_actual;
    }
    if fields.weight_before.is_some() {
        exercise.weight_before = fields.weight_before;
    }
    if let Some(ref notes) = fields.notes {
        exercise.observations = notes.clone();
    }
}

/// Positions on the command line start at 1.
fn position_to_index(context: &str, position: usize) -> Result<usize, AppError> {
    position.checked_sub(1).ok_or_else(|| {
        AppError::InvalidInput(format!(
            "Exercise positions in context '{}' start at 1",
            context
        ))
    })
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    use dialoguer::Confirm;
    Confirm::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::ConfigError(format!("Failed to get user input: {}", e)))
}

fn read_input(input: &Path) -> Result<String, AppError> {
    if input == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| AppError::InvalidPayload(format!("Failed to read stdin: {}", e)))?;
        return Ok(raw);
    }
    std::fs::read_to_string(input).map_err(|e| {
        AppError::InvalidPayload(format!("Failed to read {}: {}", input.display(), e))
    })
}
