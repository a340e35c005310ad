//! Context registry: ordered set of training context identifiers.
//!
//! The registry is persisted as one JSON array under
//! [`REGISTRY_KEY`](crate::store::REGISTRY_KEY). It never holds the same
//! identifier twice and keeps insertion order.

use crate::error::AppError;
use crate::store::{KeyValueStore, REGISTRY_KEY};
use crate::training::ContextId;
use tracing::{debug, warn};

/// Number of single-letter names (A-Z) tried before numbered names.
const LETTER_COUNT: usize = 26;

/// Prefix of the numbered fallback names.
pub const NUMBERED_PREFIX: &str = "Treino ";

/// Pick the identifier for a new context.
///
/// Tries the letter at offset `existing.len()` from 'A' and walks forward
/// while it is taken, up to 'Z'. When no letter is free, numbered names
/// `"Treino N"` are tried from the offset reached plus one until one is free.
pub fn next_context_name(existing: &[ContextId]) -> ContextId {
    let taken = |candidate: &str| existing.iter().any(|id| id == candidate);

    let mut idx = existing.len();
    while idx < LETTER_COUNT {
        let letter = char::from(b'A' + idx as u8).to_string();
        if !taken(&letter) {
            return letter;
        }
        idx += 1;
    }

    let mut n = idx + 1;
    loop {
        let candidate = format!("{}{}", NUMBERED_PREFIX, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Ordered, duplicate-free list of context identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRegistry {
    ids: Vec<ContextId>,
}

impl ContextRegistry {
    /// Registry with the given identifiers; later duplicates are dropped.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ContextId>,
    {
        let mut registry = Self { ids: Vec::new() };
        for id in ids {
            let id = id.into();
            if !registry.contains(&id) {
                registry.ids.push(id);
            }
        }
        registry
    }

    pub fn ids(&self) -> &[ContextId] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Append `id`, rejecting identifiers already present.
    pub fn add(&mut self, id: impl Into<ContextId>) -> Result<(), AppError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Context name cannot be empty".to_string(),
            ));
        }
        if self.contains(&id) {
            return Err(AppError::DuplicateContext(id));
        }
        self.ids.push(id);
        Ok(())
    }

    /// Append a generated identifier and return it.
    pub fn add_next(&mut self) -> ContextId {
        let id = next_context_name(&self.ids);
        self.ids.push(id.clone());
        id
    }

    /// Remove `id`, keeping the order of the others.
    pub fn remove(&mut self, id: &str) -> Result<(), AppError> {
        let pos = self
            .ids
            .iter()
            .position(|existing| existing == id)
            .ok_or_else(|| AppError::ContextNotFound(id.to_string()))?;
        self.ids.remove(pos);
        Ok(())
    }

    /// Load the registry from the store.
    ///
    /// Falls back to `defaults` when nothing usable is stored: no key, an
    /// empty array, or a value that is not a JSON array of strings.
    pub fn load(store: &dyn KeyValueStore, defaults: &[ContextId]) -> Result<Self, AppError> {
        let Some(raw) = store.get(REGISTRY_KEY)? else {
            debug!("No stored context registry, using defaults");
            return Ok(Self::new(defaults.iter().cloned()));
        };

        match serde_json::from_str::<Vec<ContextId>>(&raw) {
            Ok(ids) if !ids.is_empty() => Ok(Self::new(ids)),
            Ok(_) => Ok(Self::new(defaults.iter().cloned())),
            Err(e) => {
                warn!(error = %e, "Failed to read stored context registry, using defaults");
                Ok(Self::new(defaults.iter().cloned()))
            }
        }
    }

    /// Persist the whole registry.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), AppError> {
        let raw = serde_json::to_string(&self.ids)
            .map_err(|e| AppError::StorageWriteFailed(e.to_string()))?;
        store
            .set(REGISTRY_KEY, &raw)
            .map_err(|e| AppError::StorageWriteFailed(e.to_string()))
    }
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new(["A", "B", "C"])
    }
}
