//! In-memory object store backend using `DashMap`.
//!
//! Data is lost when the store is dropped. Doubles as the reference
//! implementation for custom (e.g. cloud) backends.

use dashmap::DashMap;

use super::ObjectStore;
use crate::error::{Error, Result};

/// In-memory object store using a lock-free concurrent hashmap.
///
/// Thread-safe; paths are plain string keys, and `find` scans keys for the
/// requested filename suffix.
///
/// # Example
///
/// ```rust
/// use runreg::store::{MemoryStore, ObjectStore};
///
/// let store = MemoryStore::new();
/// store.write("reg/exp/run/metadata.json", b"{}")?;
/// assert_eq!(store.find("reg", "metadata.json")?.len(), 1);
/// # Ok::<(), runreg::Error>(())
/// ```
pub struct MemoryStore {
    objects: DashMap<String, Vec<u8>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }

    /// Create with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: DashMap::with_capacity(capacity),
        }
    }

    /// Get the number of stored objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Clear all stored objects.
    pub fn clear(&self) {
        self.objects.clear();
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for MemoryStore {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        self.objects
            .get(path)
            .map(|v| v.value().clone())
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        self.objects.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.objects.contains_key(path))
    }

    fn find(&self, prefix: &str, filename: &str) -> Result<Vec<String>> {
        let prefix_dir = format!("{}/", prefix.trim_end_matches('/'));
        let suffix = format!("/{filename}");
        let mut found: Vec<String> = self
            .objects
            .iter()
            .map(|entry| entry.key().clone())
            .filter(|key| key.starts_with(&prefix_dir) && key.ends_with(&suffix))
            .collect();
        found.sort();
        Ok(found)
    }
}
