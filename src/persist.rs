//! Persistence - serialize runs to a registry layout and read them back
//!
//! A run is persisted as a `runreg_metadata.json` file (identity, timestamp,
//! params, metrics, dicts, and per-artifact metadata) plus one file per
//! artifact payload under `artifacts/`. Marker files are written at the
//! registry, experiment, and variant levels the first time each is used.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::registry::{
    join_path, latest_run_for_variant_with, EXPERIMENT_MARKER, REGISTRY_MARKER, RUN_METADATA_FILE,
    VARIANT_MARKER,
};
use crate::run::{Artifact, ArtifactKind, ExperimentRun, LogValue};
use crate::store::{store_for_uri, strip_scheme, ObjectStore};

/// Directory holding artifact payloads inside a run directory.
const ARTIFACTS_DIR: &str = "artifacts";

/// Per-artifact metadata stored in `runreg_metadata.json`; the payload
/// itself lives under `artifacts/`.
#[derive(Debug, Serialize, Deserialize)]
struct ArtifactMeta {
    id: String,
    filename: String,
    #[serde(rename = "artifact_type")]
    kind: ArtifactKind,
}

/// On-disk schema of `runreg_metadata.json`.
#[derive(Debug, Serialize, Deserialize)]
struct RunMetadata {
    timestamp_utc: DateTime<Utc>,
    experiment_id: String,
    variant_id: String,
    run_id: String,
    params: BTreeMap<String, LogValue>,
    metrics: BTreeMap<String, LogValue>,
    dicts: BTreeMap<String, BTreeMap<String, LogValue>>,
    artifacts: BTreeMap<String, ArtifactMeta>,
}

impl RunMetadata {
    fn from_run(er: &ExperimentRun) -> Self {
        Self {
            timestamp_utc: er.timestamp_utc(),
            experiment_id: er.experiment_id().to_string(),
            variant_id: er.variant_id().to_string(),
            run_id: er.run_id().to_string(),
            params: er.params().clone(),
            metrics: er.metrics().clone(),
            dicts: er.dicts().clone(),
            artifacts: er
                .artifacts()
                .iter()
                .map(|(id, artifact)| {
                    (
                        id.clone(),
                        ArtifactMeta {
                            id: artifact.id().to_string(),
                            filename: artifact.filename().to_string(),
                            kind: artifact.kind(),
                        },
                    )
                })
                .collect(),
        }
    }
}

fn write_marker_once(
    store: &dyn ObjectStore,
    path: &str,
    contents: &serde_json::Value,
) -> Result<()> {
    if !store.exists(path)? {
        store.write(path, serde_json::to_string(contents)?.as_bytes())?;
    }
    Ok(())
}

/// Save a run into a registry, creating marker files as needed.
///
/// Returns the path of the saved run. Refuses to overwrite an existing run.
///
/// Note: a `memory://` URI resolves to a fresh store on every call, so a
/// run saved through this convenience function is dropped as soon as it
/// returns. To persist in memory, keep a
/// [`MemoryStore`](crate::store::MemoryStore) and pass it to
/// [`save_run_to_registry_with`].
///
/// # Errors
///
/// Returns `Error::RunExists` if a run with the same id is already stored,
/// `Error::UnsupportedScheme` for URIs without a built-in backend, or any
/// store error.
pub fn save_run_to_registry(er: &ExperimentRun, registry_uri: &str) -> Result<String> {
    let store = store_for_uri(registry_uri)?;
    save_run_to_registry_with(er, registry_uri, store.as_ref(), false)
}

/// Save a run into a registry using a caller-provided store.
///
/// # Errors
///
/// Returns `Error::RunExists` if a run with the same id is already stored
/// and `overwrite` is false, or any store error.
pub fn save_run_to_registry_with(
    er: &ExperimentRun,
    registry_uri: &str,
    store: &dyn ObjectStore,
    overwrite: bool,
) -> Result<String> {
    let root = strip_scheme(registry_uri)?;

    write_marker_once(
        store,
        &join_path(&[root, REGISTRY_MARKER]),
        &json!({ "created_timestamp_utc": Utc::now().to_rfc3339() }),
    )?;
    write_marker_once(
        store,
        &join_path(&[root, er.experiment_id(), EXPERIMENT_MARKER]),
        &json!({
            "experiment_id": er.experiment_id(),
            "created_timestamp_utc": Utc::now().to_rfc3339(),
        }),
    )?;
    write_marker_once(
        store,
        &join_path(&[root, er.experiment_id(), er.variant_id(), VARIANT_MARKER]),
        &json!({
            "variant_id": er.variant_id(),
            "created_timestamp_utc": Utc::now().to_rfc3339(),
        }),
    )?;

    let run_path = join_path(&[registry_uri, er.experiment_id(), er.variant_id(), er.run_id()]);
    save_run_to_path_with(er, &run_path, store, overwrite)?;
    Ok(run_path)
}

/// Save a run to an explicit path.
///
/// # Errors
///
/// Returns `Error::RunExists` if a run is already stored at `path`, or any
/// store error.
pub fn save_run_to_path(er: &ExperimentRun, path: &str) -> Result<()> {
    let store = store_for_uri(path)?;
    save_run_to_path_with(er, path, store.as_ref(), false)
}

/// Save a run to an explicit path using a caller-provided store.
///
/// # Errors
///
/// Returns `Error::RunExists` if a run is already stored at `path` and
/// `overwrite` is false, `Error::DuplicateArtifactFilename` if two
/// artifacts would persist to the same file, or any store error.
pub fn save_run_to_path_with(
    er: &ExperimentRun,
    path: &str,
    store: &dyn ObjectStore,
    overwrite: bool,
) -> Result<()> {
    // Artifacts are stored flat under artifacts/, so filenames must be unique
    let mut filenames: BTreeMap<&str, &str> = BTreeMap::new();
    for artifact in er.artifacts().values() {
        if let Some(first_id) = filenames.insert(artifact.filename(), artifact.id()) {
            return Err(Error::DuplicateArtifactFilename {
                first_id: first_id.to_string(),
                second_id: artifact.id().to_string(),
                filename: artifact.filename().to_string(),
            });
        }
    }

    let run_dir = strip_scheme(path)?;
    let metadata_path = join_path(&[run_dir, RUN_METADATA_FILE]);

    if !overwrite && store.exists(&metadata_path)? {
        return Err(Error::RunExists {
            path: path.to_string(),
        });
    }

    let metadata = RunMetadata::from_run(er);
    store.write(&metadata_path, serde_json::to_string(&metadata)?.as_bytes())?;

    for artifact in er.artifacts().values() {
        let artifact_path = join_path(&[run_dir, ARTIFACTS_DIR, artifact.filename()]);
        store.write(&artifact_path, artifact.bytes())?;
    }

    info!("experiment run saved to {path}");
    Ok(())
}

/// Load a run from its path.
///
/// # Errors
///
/// Returns `Error::NotFound` if no run is stored at `run_path`, or any
/// store/deserialization error.
pub fn load_run_from_path(run_path: &str) -> Result<ExperimentRun> {
    let store = store_for_uri(run_path)?;
    load_run_from_path_with(run_path, store.as_ref())
}

/// Load a run from its path using a caller-provided store.
///
/// # Errors
///
/// Returns `Error::NotFound` if no run is stored at `run_path`, or any
/// store/deserialization error.
pub fn load_run_from_path_with(run_path: &str, store: &dyn ObjectStore) -> Result<ExperimentRun> {
    let run_dir = strip_scheme(run_path)?;
    let metadata_bytes = store.read(&join_path(&[run_dir, RUN_METADATA_FILE]))?;
    let metadata: RunMetadata = serde_json::from_slice(&metadata_bytes)?;
    debug!(
        run_id = %metadata.run_id,
        artifacts = metadata.artifacts.len(),
        "loaded run metadata"
    );

    let mut artifacts = BTreeMap::new();
    for (id, meta) in metadata.artifacts {
        let payload = store.read(&join_path(&[run_dir, ARTIFACTS_DIR, &meta.filename]))?;
        artifacts.insert(id, Artifact::new(meta.id, meta.filename, meta.kind, payload));
    }

    Ok(ExperimentRun::restore(
        metadata.experiment_id,
        metadata.variant_id,
        metadata.run_id,
        metadata.timestamp_utc,
        metadata.params,
        metadata.metrics,
        metadata.dicts,
        artifacts,
    ))
}

/// Load a run from a registry.
///
/// With `run_id = None`, the latest run for the variant is loaded.
///
/// # Errors
///
/// Returns `Error::NoRuns` if the variant has no stored runs, or any
/// store/deserialization error.
pub fn load_run_from_registry(
    registry_uri: &str,
    experiment_id: &str,
    variant_id: &str,
    run_id: Option<&str>,
) -> Result<ExperimentRun> {
    let store = store_for_uri(registry_uri)?;
    load_run_from_registry_with(registry_uri, experiment_id, variant_id, run_id, store.as_ref())
}

/// Load a run from a registry using a caller-provided store.
///
/// # Errors
///
/// Returns `Error::NoRuns` if the variant has no stored runs, or any
/// store/deserialization error.
pub fn load_run_from_registry_with(
    registry_uri: &str,
    experiment_id: &str,
    variant_id: &str,
    run_id: Option<&str>,
    store: &dyn ObjectStore,
) -> Result<ExperimentRun> {
    let run_id = match run_id {
        Some(id) => id.to_string(),
        None => latest_run_for_variant_with(registry_uri, experiment_id, variant_id, store)?,
    };
    let run_path = join_path(&[registry_uri, experiment_id, variant_id, &run_id]);
    load_run_from_path_with(&run_path, store)
}
