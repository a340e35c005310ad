//! Key-value store
//!
//! The training log persists everything as JSON strings under string keys:
//! the context registry under [`REGISTRY_KEY`] and one training form per
//! context under [`training_key`]. Backends only have to move strings around.

pub mod memory;
pub mod persistence;

pub use memory::MemoryStore;
pub use persistence::SledStore;

use crate::error::StorageError;

/// Key holding the JSON array of context identifiers.
pub const REGISTRY_KEY: &str = "training-contexts";

/// Prefix of the per-context training form keys.
pub const TRAINING_KEY_PREFIX: &str = "trains-";

/// Storage key of the training form for `context`.
pub fn training_key(context: &str) -> String {
    format!("{}{}", TRAINING_KEY_PREFIX, context)
}

/// Context identifier encoded in a training form key, if it is one.
pub fn context_from_key(key: &str) -> Option<&str> {
    key.strip_prefix(TRAINING_KEY_PREFIX)
}

/// Key-value store interface
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Read several keys, returning them in request order.
    fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StorageError> {
        keys.iter()
            .map(|key| Ok((key.clone(), self.get(key)?)))
            .collect()
    }

    /// Write several keys. Backends that can should apply this atomically.
    fn multi_set(&self, entries: &[(String, String)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}
