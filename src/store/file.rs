//! File-based store
//!
//! All keys live in a single JSON object on disk, mapping each key to its
//! string blob. Every operation goes back to the file, so writes made by
//! another process are seen on the next read. Writes go to a temporary
//! sibling file that is then renamed over the original.

use super::traits::KeyValueStore;
use crate::error::{ContentError, ContentResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

type Entries = BTreeMap<String, String>;

/// JSON file store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write of the file within this process
    file_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by `path`
    ///
    /// The file is created lazily on first write. Parent directories must
    /// exist or be creatable.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_lock: Mutex::new(()),
        }
    }

    /// Open a store and check the file, if present, is readable
    pub fn open(path: impl Into<PathBuf>) -> ContentResult<Self> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> ContentResult<Entries> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(ContentError::StorageLoadFailed(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            ContentError::StorageLoadFailed(format!("{}: {}", self.path.display(), e))
        })
    }

    fn save(&self, entries: &Entries) -> ContentResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ContentError::StorageSaveFailed(e.to_string()))?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|e| {
            ContentError::StorageSaveFailed(format!("{}: {}", temp_path.display(), e))
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| {
            ContentError::StorageSaveFailed(format!("{}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), keys = entries.len(), "store file saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> ContentResult<Option<String>> {
        let _guard = self.file_lock.lock()?;
        Ok(self.load()?.remove(key))
    }

    fn write(&self, key: &str, value: &str) -> ContentResult<()> {
        let _guard = self.file_lock.lock()?;
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> ContentResult<()> {
        let _guard = self.file_lock.lock()?;
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
