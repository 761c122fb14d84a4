//! In-memory store
//!
//! Lives as long as the process. Used by tests and by callers that only
//! need a scratch repository.

use super::traits::KeyValueStore;
use crate::error::ContentResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with raw blobs
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of writes and removals performed so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> ContentResult<Option<String>> {
        Ok(self.entries.lock()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> ContentResult<()> {
        self.entries
            .lock()?
            .insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> ContentResult<()> {
        self.entries.lock()?.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
