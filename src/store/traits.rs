//! Key-value store trait
//!
//! The repository layers its collections on this interface. Different
//! implementations provide different storage backends.

use crate::error::ContentResult;

/// Synchronous string-keyed store of whole string blobs
///
/// Implementations must make a completed `write` visible to the next `read`
/// of the same key. No transactional isolation is expected: two writers of
/// the same key simply overwrite each other.
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`
    fn read(&self, key: &str) -> ContentResult<Option<String>>;

    /// Replace the blob stored under `key`
    fn write(&self, key: &str, value: &str) -> ContentResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> ContentResult<()>;

    /// Check if a key exists
    fn contains(&self, key: &str) -> ContentResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_default_method() {
        struct FixedStore;

        impl KeyValueStore for FixedStore {
            fn read(&self, key: &str) -> ContentResult<Option<String>> {
                Ok((key == "present").then(|| "[]".to_string()))
            }

            fn write(&self, _key: &str, _value: &str) -> ContentResult<()> {
                Ok(())
            }

            fn remove(&self, _key: &str) -> ContentResult<()> {
                Ok(())
            }
        }

        let store = FixedStore;
        assert!(store.contains("present").unwrap());
        assert!(!store.contains("absent").unwrap());
    }
}
