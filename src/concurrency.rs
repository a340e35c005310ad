//! Per-key mutual exclusion for store access.
//!
//! Every storage key gets its own mutex. Apps over one store share one
//! manager through an `Arc`. A read-modify-write of a context's form holds
//! that key's lock from the read to the write, so a reload of a context cannot
//! observe the store before an earlier save to the same key has finished.
//! Distinct keys never contend.

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use std::collections::HashMap;
use std::sync::Arc;

/// Held lock on one key; released on drop.
pub type KeyGuard = ArcMutexGuard<RawMutex, ()>;

/// Hands out one lock per storage key
#[derive(Debug, Default)]
pub struct KeyLockManager {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    /// Block until `key` is free and hold it until the guard drops.
    pub fn lock(&self, key: &str) -> KeyGuard {
        self.lock_for(key).lock_arc()
    }

    /// Lock several keys in sorted order so concurrent callers cannot deadlock.
    pub fn lock_many(&self, keys: &[String]) -> Vec<KeyGuard> {
        let mut sorted: Vec<&String> = keys.iter().collect();
        sorted.sort();
        sorted.dedup();
        sorted.into_iter().map(|key| self.lock(key)).collect()
    }

    /// Forget the lock of `key` unless someone holds or waits for it.
    pub fn release(&self, key: &str) {
        let mut locks = self.locks.lock();
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
    }

    /// Number of keys with a tracked lock.
    pub fn tracked_keys(&self) -> usize {
        self.locks.lock().len()
    }
}
