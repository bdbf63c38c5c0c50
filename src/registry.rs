//! Registry - directory-layout conventions and listing
//!
//! A registry is a storage location (local or remote) holding persisted runs
//! for later retrieval and comparison. Runs are laid out as:
//!
//! ```text
//! <root>/.runreg_registry.json
//! <root>/<experiment_id>/.runreg_experiment.json
//! <root>/<experiment_id>/<variant_id>/.runreg_variant.json
//! <root>/<experiment_id>/<variant_id>/<run_id>/runreg_metadata.json
//! <root>/<experiment_id>/<variant_id>/<run_id>/artifacts/<filename>
//! ```
//!
//! Marker files double as the listing index: an experiment exists iff its
//! marker file does, so listing is a recursive search for markers.

use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{store_for_uri, strip_scheme, ObjectStore};

/// Marker file identifying a registry root.
pub const REGISTRY_MARKER: &str = ".runreg_registry.json";
/// Marker file identifying an experiment directory.
pub const EXPERIMENT_MARKER: &str = ".runreg_experiment.json";
/// Marker file identifying a variant directory.
pub const VARIANT_MARKER: &str = ".runreg_variant.json";
/// Metadata file identifying a run directory.
pub const RUN_METADATA_FILE: &str = "runreg_metadata.json";

/// Join URI segments with `/`, ignoring empty segments.
pub(crate) fn join_path(parts: &[&str]) -> String {
    let mut joined = String::new();
    for part in parts {
        let part = part.trim_end_matches('/');
        if part.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(part);
    }
    joined
}

/// The id between `base/` and `/marker` in a found path.
fn relative_id(base: &str, path: &str, marker: &str) -> Option<String> {
    let rest = path.strip_prefix(base)?.strip_prefix('/')?;
    rest.strip_suffix(marker)?
        .strip_suffix('/')
        .map(ToString::to_string)
}

fn list_markers(
    store: &dyn ObjectStore,
    base_uri: &str,
    marker: &str,
) -> Result<Vec<String>> {
    let base = strip_scheme(base_uri)?;
    let paths = store.find(base, marker)?;
    debug!(base, marker, found = paths.len(), "listed registry markers");
    Ok(paths
        .iter()
        .filter_map(|path| {
            let path = strip_scheme(path).unwrap_or(path);
            relative_id(base, path, marker)
        })
        .collect())
}

/// List the experiments stored in a registry.
///
/// # Errors
///
/// Returns an error if the registry URI cannot be resolved or listed.
pub fn list_experiments(registry_uri: &str) -> Result<Vec<String>> {
    let store = store_for_uri(registry_uri)?;
    list_experiments_with(registry_uri, store.as_ref())
}

/// List the experiments stored in a registry, using a caller-provided store.
///
/// # Errors
///
/// Returns an error if the registry cannot be listed.
pub fn list_experiments_with(registry_uri: &str, store: &dyn ObjectStore) -> Result<Vec<String>> {
    list_markers(store, registry_uri, EXPERIMENT_MARKER)
}

/// List the variants stored for an experiment.
///
/// # Errors
///
/// Returns an error if the registry URI cannot be resolved or listed.
pub fn list_variants(registry_uri: &str, experiment_id: &str) -> Result<Vec<String>> {
    let store = store_for_uri(registry_uri)?;
    list_variants_with(registry_uri, experiment_id, store.as_ref())
}

/// List the variants stored for an experiment, using a caller-provided store.
///
/// # Errors
///
/// Returns an error if the registry cannot be listed.
pub fn list_variants_with(
    registry_uri: &str,
    experiment_id: &str,
    store: &dyn ObjectStore,
) -> Result<Vec<String>> {
    let base = join_path(&[registry_uri, experiment_id]);
    list_markers(store, &base, VARIANT_MARKER)
}

/// List the runs stored for an experiment variant.
///
/// # Errors
///
/// Returns an error if the registry URI cannot be resolved or listed.
pub fn list_runs(registry_uri: &str, experiment_id: &str, variant_id: &str) -> Result<Vec<String>> {
    let store = store_for_uri(registry_uri)?;
    list_runs_with(registry_uri, experiment_id, variant_id, store.as_ref())
}

/// List the runs stored for an experiment variant, using a caller-provided
/// store.
///
/// # Errors
///
/// Returns an error if the registry cannot be listed.
pub fn list_runs_with(
    registry_uri: &str,
    experiment_id: &str,
    variant_id: &str,
    store: &dyn ObjectStore,
) -> Result<Vec<String>> {
    let base = join_path(&[registry_uri, experiment_id, variant_id]);
    list_markers(store, &base, RUN_METADATA_FILE)
}

/// Get the latest run id for an experiment variant.
///
/// Run ids default to sortable UTC timestamps, so the lexicographically
/// greatest id is the most recent.
///
/// # Errors
///
/// Returns `Error::NoRuns` if the variant has no stored runs.
pub fn latest_run_for_variant(
    registry_uri: &str,
    experiment_id: &str,
    variant_id: &str,
) -> Result<String> {
    let store = store_for_uri(registry_uri)?;
    latest_run_for_variant_with(registry_uri, experiment_id, variant_id, store.as_ref())
}

/// Get the latest run id for an experiment variant, using a caller-provided
/// store.
///
/// # Errors
///
/// Returns `Error::NoRuns` if the variant has no stored runs.
pub fn latest_run_for_variant_with(
    registry_uri: &str,
    experiment_id: &str,
    variant_id: &str,
    store: &dyn ObjectStore,
) -> Result<String> {
    let mut runs = list_runs_with(registry_uri, experiment_id, variant_id, store)?;
    runs.sort();
    runs.pop().ok_or_else(|| Error::NoRuns {
        uri: registry_uri.to_string(),
        experiment_id: experiment_id.to_string(),
        variant_id: variant_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&["/reg/", "exp", "main"]), "/reg/exp/main");
        assert_eq!(join_path(&["reg", "", "exp"]), "reg/exp");
    }

    #[test]
    fn test_relative_id() {
        assert_eq!(
            relative_id("/reg", "/reg/exp-1/.runreg_experiment.json", EXPERIMENT_MARKER),
            Some("exp-1".to_string())
        );
        assert_eq!(
            relative_id("/reg", "/other/.runreg_experiment.json", EXPERIMENT_MARKER),
            None
        );
    }

    #[test]
    fn test_list_experiments_with_memory_store() {
        let store = MemoryStore::new();
        store
            .write("reg/exp-a/.runreg_experiment.json", b"{}")
            .unwrap();
        store
            .write("reg/exp-b/.runreg_experiment.json", b"{}")
            .unwrap();

        let experiments = list_experiments_with("reg", &store).unwrap();
        assert_eq!(experiments, vec!["exp-a", "exp-b"]);
    }

    #[test]
    fn test_latest_run_empty_variant_errors() {
        let store = MemoryStore::new();
        let err = latest_run_for_variant_with("reg", "exp", "main", &store).unwrap_err();
        assert!(matches!(err, Error::NoRuns { .. }));
    }
}
