//! Training application state
//!
//! `TrainingApp` owns the context registry and an in-memory copy of every
//! loaded training form, and exposes the user-facing commands. Each command
//! returns a `Result`; in-memory state only changes after the store write it
//! depends on has succeeded.

use crate::concurrency::KeyLockManager;
use crate::error::AppError;
use crate::registry::ContextRegistry;
use crate::share::ShareSink;
use crate::store::{context_from_key, training_key, KeyValueStore, REGISTRY_KEY};
use crate::summary::{summarize, summarize_progress, ProgressReport, Summary};
use crate::training::{empty_data, ContextId, Exercise, TrainingDataMap, TrainingForm};
use crate::transfer;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Title handed to the share sink when none is configured.
pub const DEFAULT_EXPORT_TITLE: &str = "Treinos";

/// Application state container over a key-value store
pub struct TrainingApp<S: KeyValueStore> {
    store: Arc<S>,
    locks: Arc<KeyLockManager>,
    defaults: Vec<ContextId>,
    registry: ContextRegistry,
    data: TrainingDataMap,
    export_title: String,
}

impl<S: KeyValueStore> TrainingApp<S> {
    /// New container with an empty cache and its own lock manager; call
    /// `load_registry` before use.
    pub fn new(store: Arc<S>, defaults: Vec<ContextId>) -> Self {
        Self::with_lock_manager(store, Arc::new(KeyLockManager::new()), defaults)
    }

    /// New container sharing `locks` with every other container over the
    /// same store. Key locks only exclude holders of the same manager.
    pub fn with_lock_manager(
        store: Arc<S>,
        locks: Arc<KeyLockManager>,
        defaults: Vec<ContextId>,
    ) -> Self {
        let registry = ContextRegistry::new(defaults.iter().cloned());
        Self {
            store,
            locks,
            defaults,
            registry,
            data: TrainingDataMap::new(),
            export_title: DEFAULT_EXPORT_TITLE.to_string(),
        }
    }

    pub fn with_export_title(mut self, title: impl Into<String>) -> Self {
        self.export_title = title.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lock_manager(&self) -> &Arc<KeyLockManager> {
        &self.locks
    }

    pub fn registry(&self) -> &ContextRegistry {
        &self.registry
    }

    pub fn context_ids(&self) -> &[ContextId] {
        self.registry.ids()
    }

    /// Cached training data, one entry per loaded context.
    pub fn data(&self) -> &TrainingDataMap {
        &self.data
    }

    /// Cached form of `ctx`, if loaded.
    pub fn form(&self, ctx: &str) -> Option<&TrainingForm> {
        self.data.get(ctx)
    }

    fn ensure_context(&self, ctx: &str) -> Result<(), AppError> {
        if self.registry.contains(ctx) {
            Ok(())
        } else {
            Err(AppError::ContextNotFound(ctx.to_string()))
        }
    }

    /// Load the registry, falling back to the defaults.
    pub fn load_registry(&mut self) -> Result<&ContextRegistry, AppError> {
        let _guard = self.locks.lock(REGISTRY_KEY);
        self.registry = ContextRegistry::load(self.store.as_ref(), &self.defaults)?;
        let registry = &self.registry;
        self.data.retain(|ctx, _| registry.contains(ctx));
        debug!(contexts = self.registry.len(), "Context registry loaded");
        Ok(&self.registry)
    }

    /// Reload the registry under its key lock, apply `change`, and persist.
    /// The cached registry is replaced only after the write succeeded.
    fn update_registry<R, F>(&mut self, change: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut ContextRegistry) -> Result<R, AppError>,
    {
        let _guard = self.locks.lock(REGISTRY_KEY);
        let mut next = ContextRegistry::load(self.store.as_ref(), &self.defaults)?;
        let out = change(&mut next)?;
        next.save(self.store.as_ref())?;
        self.registry = next;
        let registry = &self.registry;
        self.data.retain(|ctx, _| registry.contains(ctx));
        Ok(out)
    }

    /// Add a context named by the naming policy and return its identifier.
    pub fn add_context(&mut self) -> Result<ContextId, AppError> {
        let id = self.update_registry(|registry| Ok(registry.add_next()))?;
        self.data.insert(id.clone(), TrainingForm::new());
        info!(context = %id, "Context added");
        Ok(id)
    }

    /// Add a context with an explicit name.
    pub fn add_named_context(&mut self, id: &str) -> Result<ContextId, AppError> {
        self.update_registry(|registry| registry.add(id))?;
        self.data.insert(id.to_string(), TrainingForm::new());
        info!(context = %id, "Context added");
        Ok(id.to_string())
    }

    /// Remove a context and, best effort, its stored training form.
    ///
    /// The registry update is what matters: a failed delete of the form only
    /// leaves an orphaned key behind, which nothing reads.
    pub fn remove_context(&mut self, id: &str) -> Result<(), AppError> {
        self.update_registry(|registry| registry.remove(id))?;
        self.data.remove(id);

        let key = training_key(id);
        {
            let _guard = self.locks.lock(&key);
            if let Err(e) = self.store.remove(&key) {
                warn!(context = %id, error = %e, "Failed to remove stored training");
            }
        }
        self.locks.release(&key);
        info!(context = %id, "Context removed");
        Ok(())
    }

    /// Load one context's form from the store into the cache.
    ///
    /// An absent key yields an empty form. A stored value that does not parse
    /// is logged and replaced by an empty form for this context only.
    pub fn load_form(&mut self, ctx: &str) -> Result<&TrainingForm, AppError> {
        self.ensure_context(ctx)?;
        let key = training_key(ctx);
        let form = {
            let _guard = self.locks.lock(&key);
            let raw = self.store.get(&key)?;
            decode_form(ctx, raw.as_deref())
        };
        self.data.insert(ctx.to_string(), form);
        Ok(&self.data[ctx])
    }

    /// Validate and persist `form` for `ctx`, then update the cache.
    pub fn save_form(&mut self, ctx: &str, form: TrainingForm) -> Result<(), AppError> {
        self.ensure_context(ctx)?;
        let key = training_key(ctx);
        {
            let _guard = self.locks.lock(&key);
            self.write_form(ctx, &key, &form)?;
        }
        self.data.insert(ctx.to_string(), form);
        Ok(())
    }

    /// Read-modify-write of one context's form under its key lock.
    ///
    /// Unlike `load_form`, an undecodable stored value is an error here:
    /// saving on top of it would discard whatever it still holds.
    fn update_form<R, F>(&mut self, ctx: &str, change: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut TrainingForm) -> Result<R, AppError>,
    {
        self.ensure_context(ctx)?;
        let key = training_key(ctx);
        let _guard = self.locks.lock(&key);
        let mut form = match self.store.get(&key)? {
            Some(raw) => parse_form(ctx, &raw)?,
            None => TrainingForm::new(),
        };
        let out = change(&mut form)?;
        self.write_form(ctx, &key, &form)?;
        self.data.insert(ctx.to_string(), form);
        Ok(out)
    }

    /// Validate and store `form`; the caller holds the key lock.
    fn write_form(&self, ctx: &str, key: &str, form: &TrainingForm) -> Result<(), AppError> {
        form.validate().map_err(AppError::Validation)?;
        let raw = serde_json::to_string(form)
            .map_err(|e| AppError::StorageWriteFailed(e.to_string()))?;
        self.store
            .set(key, &raw)
            .map_err(|e| AppError::StorageWriteFailed(e.to_string()))?;
        info!(context = %ctx, exercises = form.len(), "Training saved");
        Ok(())
    }

    /// Append `exercise` to the stored form of `ctx` and save. Returns the new
    /// entry's index.
    pub fn add_exercise(&mut self, ctx: &str, exercise: Exercise) -> Result<usize, AppError> {
        self.update_form(ctx, |form| {
            let index = form.add_exercise();
            form.trains[index] = exercise;
            Ok(index)
        })
    }

    /// Apply `edit` to entry `index` of `ctx` and save.
    pub fn edit_exercise<F>(&mut self, ctx: &str, index: usize, edit: F) -> Result<&Exercise, AppError>
    where
        F: FnOnce(&mut Exercise),
    {
        self.update_form(ctx, |form| {
            let entry = form
                .trains
                .get_mut(index)
                .ok_or_else(|| AppError::ExerciseNotFound {
                    context: ctx.to_string(),
                    index,
                })?;
            edit(entry);
            Ok(())
        })?;
        Ok(&self.data[ctx].trains[index])
    }

    /// Remove entry `index` of `ctx` and save.
    pub fn remove_exercise(&mut self, ctx: &str, index: usize) -> Result<Exercise, AppError> {
        self.update_form(ctx, |form| {
            form.remove_exercise(index)
                .ok_or_else(|| AppError::ExerciseNotFound {
                    context: ctx.to_string(),
                    index,
                })
        })
    }

    /// Load every registered context's form with one multi-key read.
    ///
    /// Corrupt values are isolated per context and degrade to an empty form.
    pub fn load_all(&mut self) -> Result<&TrainingDataMap, AppError> {
        let keys: Vec<String> = self.registry.ids().iter().map(|id| training_key(id)).collect();
        let stored = {
            let _guards = self.locks.lock_many(&keys);
            self.store.multi_get(&keys)?
        };

        let mut next = empty_data(self.registry.ids());
        for (key, value) in stored {
            let Some(ctx) = context_from_key(&key) else {
                continue;
            };
            if !self.registry.contains(ctx) {
                continue;
            }
            next.insert(ctx.to_string(), decode_form(ctx, value.as_deref()));
        }

        self.data = next;
        debug!(contexts = self.data.len(), "All trainings loaded");
        Ok(&self.data)
    }

    /// Dashboard totals over the cached data.
    pub fn summary(&self) -> Summary {
        summarize(self.registry.ids(), &self.data)
    }

    /// Progress figures over the cached data.
    pub fn progress(&self) -> ProgressReport {
        summarize_progress(self.registry.ids(), &self.data)
    }

    /// Snapshot of the cached data restricted to registered contexts, with an
    /// empty form for any context not loaded yet.
    pub fn snapshot(&self) -> TrainingDataMap {
        self.registry
            .ids()
            .iter()
            .map(|ctx| (ctx.clone(), self.data.get(ctx).cloned().unwrap_or_default()))
            .collect()
    }

    /// Serialize the cached data and hand it to `sink`.
    pub fn export(&self, sink: &dyn ShareSink) -> Result<String, AppError> {
        let body = transfer::serialize(&self.snapshot())?;
        sink.share(&self.export_title, &body).map_err(|e| {
            warn!(error = %e, "Export failed");
            AppError::from(e)
        })?;
        info!(contexts = self.registry.len(), "Trainings exported");
        Ok(body)
    }

    /// Reconcile `raw` against the registry, write every context, then
    /// replace the cache.
    ///
    /// A rejected payload or a failed write leaves the cache untouched. All
    /// contexts go to the store in a single `multi_set`.
    pub fn import(&mut self, raw: &str) -> Result<&TrainingDataMap, AppError> {
        let next = transfer::reconcile(raw, self.registry.ids()).map_err(|e| {
            warn!(error = %e, "Import rejected");
            AppError::from(e)
        })?;

        let entries = next
            .iter()
            .map(|(ctx, form)| {
                serde_json::to_string(form)
                    .map(|raw| (training_key(ctx), raw))
                    .map_err(|e| AppError::StorageWriteFailed(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let keys: Vec<String> = entries.iter().map(|(key, _)| key.clone()).collect();

        {
            let _guards = self.locks.lock_many(&keys);
            self.store.multi_set(&entries).map_err(|e| {
                warn!(error = %e, "Import write failed");
                AppError::StorageWriteFailed(e.to_string())
            })?;
        }

        self.data = next;
        info!(contexts = self.data.len(), "Trainings imported");
        Ok(&self.data)
    }
}

fn parse_form(ctx: &str, raw: &str) -> Result<TrainingForm, AppError> {
    serde_json::from_str(raw).map_err(|e| AppError::StorageReadFailed {
        context: ctx.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a stored form for reading; unreadable values degrade to an empty
/// form.
fn decode_form(ctx: &str, raw: Option<&str>) -> TrainingForm {
    let Some(raw) = raw else {
        return TrainingForm::new();
    };
    parse_form(ctx, raw).unwrap_or_else(|err| {
        warn!(error = %err, "Using empty training");
        TrainingForm::new()
    })
}
