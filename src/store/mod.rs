//! Object Store Module
//!
//! Pluggable storage abstraction the registry persists runs through, with:
//! - A local-filesystem backend (`LocalStore`)
//! - An in-memory backend (`MemoryStore`) for tests and ephemeral registries
//! - URI scheme dispatch for the built-in backends
//!
//! Cloud backends (S3, GCS, Azure) are deliberately not bundled; they plug
//! in by implementing [`ObjectStore`] and using the `*_with` entry points
//! in `persist` and `registry`.
//!
//! # Example
//!
//! ```rust
//! use runreg::store::{MemoryStore, ObjectStore};
//!
//! let store = MemoryStore::new();
//! store.write("a/b/data.json", b"{}")?;
//! assert!(store.exists("a/b/data.json")?);
//! assert_eq!(store.read("a/b/data.json")?, b"{}");
//! # Ok::<(), runreg::Error>(())
//! ```

mod local;
mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};

/// Object store trait the registry and persistence layers are written
/// against.
///
/// Paths are `/`-separated, scheme-less keys (`registry/exp/variant/run/...`).
/// Implementations are expected to create any missing parent hierarchy on
/// `write`.
pub trait ObjectStore: Send + Sync {
    /// Read an object's bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no object exists at `path`.
    fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Write an object, overwriting any existing one and creating parents
    /// as needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the backend cannot store the object.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Check whether an object exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be queried.
    fn exists(&self, path: &str) -> Result<bool>;

    /// Find every object named exactly `filename` under `prefix`,
    /// recursively. Results are full paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed.
    fn find(&self, prefix: &str, filename: &str) -> Result<Vec<String>>;
}

impl std::fmt::Debug for dyn ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ObjectStore")
    }
}

/// Strip a single `scheme://` prefix from a URI, if present.
///
/// # Errors
///
/// Returns `Error::MalformedUri` if the URI contains more than one `://`.
pub fn strip_scheme(uri: &str) -> Result<&str> {
    let mut parts = uri.splitn(2, "://");
    let first = parts.next().unwrap_or(uri);
    match parts.next() {
        None => Ok(first),
        Some(rest) if rest.contains("://") => Err(Error::MalformedUri(uri.to_string())),
        Some(rest) => Ok(rest),
    }
}

/// The scheme of a URI, if it has one.
#[must_use]
pub fn scheme_of(uri: &str) -> Option<&str> {
    uri.split_once("://").map(|(scheme, _)| scheme)
}

/// Resolve a built-in object store for a URI.
///
/// Bare paths and `file://` resolve to [`LocalStore`]; `memory://` resolves
/// to a fresh [`MemoryStore`].
///
/// # Errors
///
/// Returns `Error::UnsupportedScheme` for any other scheme (`s3`, `gs`,
/// `az`, ...). Those backends are supported through the `*_with` functions
/// with a caller-provided [`ObjectStore`].
pub fn store_for_uri(uri: &str) -> Result<Box<dyn ObjectStore>> {
    match scheme_of(uri) {
        None | Some("file") => Ok(Box::new(LocalStore::new())),
        Some("memory") => Ok(Box::new(MemoryStore::new())),
        Some(scheme) => Err(Error::UnsupportedScheme {
            scheme: scheme.to_string(),
            uri: uri.to_string(),
        }),
    }
}
