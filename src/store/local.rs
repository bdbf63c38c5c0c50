//! Local-filesystem object store backend.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::ObjectStore;
use crate::error::{Error, Result};

/// Object store backed by the local filesystem.
///
/// Paths are used verbatim as filesystem paths, so a registry URI of
/// `/data/registry` (or `file:///data/registry`) maps straight onto the
/// directory tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

impl LocalStore {
    /// Create a new local store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn walk(dir: &Path, filename: &str, out: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                Self::walk(&path, filename, out)?;
            } else if entry.file_name().to_str() == Some(filename) {
                out.push(path.to_string_lossy().into_owned());
            }
        }
        Ok(())
    }
}

impl ObjectStore for LocalStore {
    fn read(&self, path: &str) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound(path.to_string())
            } else {
                Error::Io(e)
            }
        })
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }

    fn exists(&self, path: &str) -> Result<bool> {
        Ok(Path::new(path).exists())
    }

    fn find(&self, prefix: &str, filename: &str) -> Result<Vec<String>> {
        let root = Path::new(prefix);
        if !root.is_dir() {
            return Ok(Vec::new());
        }
        let mut found = Vec::new();
        Self::walk(root, filename, &mut found)?;
        found.sort();
        Ok(found)
    }
}
