//! Persistence layer for the key-value store

use crate::error::StorageError;
use crate::store::KeyValueStore;
use sled;
use std::path::Path;

/// Sled-based implementation of KeyValueStore
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Create a new SledStore at the given path
    ///
    /// The path is a directory; sled creates its database files there.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path).map_err(|e| {
            StorageError::Backend(format!("Failed to open sled database: {}", e))
        })?;
        Ok(Self { db })
    }

    /// Wrap an already opened database
    pub fn from_db(db: sled::Db) -> Self {
        Self { db }
    }

    /// Get the underlying sled database (for advanced operations)
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Check if a key exists in the store
    pub fn contains(&self, key: &str) -> Result<bool, StorageError> {
        self.db
            .contains_key(key.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to check key existence: {}", e)))
    }

    /// List every stored key starting with `prefix`
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for item in self.db.scan_prefix(prefix.as_bytes()) {
            let (key, _) = item
                .map_err(|e| StorageError::Backend(format!("Failed to iterate store: {}", e)))?;
            keys.push(decode_utf8(prefix, &key)?);
        }
        Ok(keys)
    }

    /// Flush all pending writes to disk
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db
            .flush()
            .map_err(|e| StorageError::Backend(format!("Failed to flush database: {}", e)))?;
        Ok(())
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self
            .db
            .get(key.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to get '{}': {}", key, e)))?
        {
            Some(value) => Ok(Some(decode_utf8(key, &value)?)),
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to set '{}': {}", key, e)))?;
        self.flush()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| StorageError::Backend(format!("Failed to remove '{}': {}", key, e)))?;
        self.flush()
    }

    /// Batch insert; sled applies the batch atomically.
    fn multi_set(&self, entries: &[(String, String)]) -> Result<(), StorageError> {
        let mut batch = sled::Batch::default();
        for (key, value) in entries {
            batch.insert(key.as_bytes(), value.as_bytes());
        }

        self.db
            .apply_batch(batch)
            .map_err(|e| StorageError::Backend(format!("Failed to apply batch: {}", e)))?;

        self.flush()
    }
}

fn decode_utf8(key: &str, bytes: &[u8]) -> Result<String, StorageError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| StorageError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
