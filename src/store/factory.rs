//! Store factory for creating store instances
//!
//! Lets configuration pick the backend without the caller naming a concrete
//! store type.

use super::file::JsonFileStore;
use super::memory::MemoryStore;
use super::traits::KeyValueStore;
use crate::error::ContentResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which backend to put under a repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StoreBackend {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// Single JSON file on disk
    JsonFile { path: PathBuf },
}

pub struct StoreFactory;

impl StoreFactory {
    /// Create a store for `backend`
    ///
    /// # Errors
    /// Fails when a JSON file backend points at an unreadable or malformed
    /// file.
    pub fn create(backend: &StoreBackend) -> ContentResult<Arc<dyn KeyValueStore>> {
        match backend {
            StoreBackend::Memory => Ok(Self::create_memory_store()),
            StoreBackend::JsonFile { path } => Self::create_file_store(path.clone()),
        }
    }

    pub fn create_memory_store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    pub fn create_file_store(path: PathBuf) -> ContentResult<Arc<dyn KeyValueStore>> {
        Ok(Arc::new(JsonFileStore::open(path)?))
    }
}
