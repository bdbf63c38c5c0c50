//! Experiment Run - one recorded attempt of a training/evaluation process

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

use super::{Artifact, ArtifactKind, LogValue};

/// Format used to derive a run id from the run timestamp.
///
/// Lexicographic order on the formatted string matches chronological order,
/// which is what `latest_run_for_variant` relies on.
pub(crate) const RUN_ID_TIMESTAMP_FORMAT: &str = "%Y_%m_%d__%H_%M_%S";

/// Experiment Run represents a single recorded attempt of a training or
/// evaluation process, identified by experiment and variant.
///
/// A run is mutated only by logging calls during its construction phase.
/// Once persisted to a registry it is treated as immutable; reloading yields
/// a fresh, fully-populated instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentRun {
    experiment_id: String,
    variant_id: String,
    run_id: String,
    timestamp_utc: DateTime<Utc>,
    params: BTreeMap<String, LogValue>,
    metrics: BTreeMap<String, LogValue>,
    dicts: BTreeMap<String, BTreeMap<String, LogValue>>,
    artifacts: BTreeMap<String, Artifact>,
}

impl ExperimentRun {
    /// Create a new run for the given experiment.
    ///
    /// The variant id defaults to `"main"`, the timestamp to now, and the
    /// run id to the timestamp formatted `%Y_%m_%d__%H_%M_%S`.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>) -> Self {
        ExperimentRunBuilder::new(experiment_id).build()
    }

    /// Create a builder for constructing a run with explicit variant id,
    /// run id, or timestamp.
    #[must_use]
    pub fn builder(experiment_id: impl Into<String>) -> ExperimentRunBuilder {
        ExperimentRunBuilder::new(experiment_id)
    }

    /// Reassemble a run from persisted parts.
    pub(crate) fn restore(
        experiment_id: String,
        variant_id: String,
        run_id: String,
        timestamp_utc: DateTime<Utc>,
        params: BTreeMap<String, LogValue>,
        metrics: BTreeMap<String, LogValue>,
        dicts: BTreeMap<String, BTreeMap<String, LogValue>>,
        artifacts: BTreeMap<String, Artifact>,
    ) -> Self {
        Self {
            experiment_id,
            variant_id,
            run_id,
            timestamp_utc,
            params,
            metrics,
            dicts,
            artifacts,
        }
    }

    /// Get the experiment id.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the variant id.
    #[must_use]
    pub fn variant_id(&self) -> &str {
        &self.variant_id
    }

    /// Get the run id.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Get the run timestamp (UTC).
    #[must_use]
    pub const fn timestamp_utc(&self) -> DateTime<Utc> {
        self.timestamp_utc
    }

    /// Get the logged parameters.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, LogValue> {
        &self.params
    }

    /// Get the logged metrics.
    #[must_use]
    pub const fn metrics(&self) -> &BTreeMap<String, LogValue> {
        &self.metrics
    }

    /// Get the logged auxiliary dicts.
    #[must_use]
    pub const fn dicts(&self) -> &BTreeMap<String, BTreeMap<String, LogValue>> {
        &self.dicts
    }

    /// Get the logged artifacts, keyed by artifact id.
    #[must_use]
    pub const fn artifacts(&self) -> &BTreeMap<String, Artifact> {
        &self.artifacts
    }

    /// Log a single parameter. Re-logging a key overwrites the old value.
    pub fn log_param(&mut self, key: impl Into<String>, value: impl Into<LogValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Log a batch of parameters.
    pub fn log_params<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<LogValue>,
    {
        for (key, value) in data {
            self.params.insert(key.into(), value.into());
        }
    }

    /// Log a single metric. Re-logging a key overwrites the old value.
    pub fn log_metric(&mut self, key: impl Into<String>, value: impl Into<LogValue>) {
        self.metrics.insert(key.into(), value.into());
    }

    /// Log a batch of metrics.
    pub fn log_metrics<K, V>(&mut self, data: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<LogValue>,
    {
        for (key, value) in data {
            self.metrics.insert(key.into(), value.into());
        }
    }

    /// Log entries into a named auxiliary dict, merging with any entries
    /// logged under the same name earlier.
    pub fn log_dict<K, V>(
        &mut self,
        dict_name: impl Into<String>,
        data: impl IntoIterator<Item = (K, V)>,
    ) where
        K: Into<String>,
        V: Into<LogValue>,
    {
        let dict = self.dicts.entry(dict_name.into()).or_default();
        for (key, value) in data {
            dict.insert(key.into(), value.into());
        }
    }

    /// Log an artifact from raw bytes.
    ///
    /// Re-logging an artifact id overwrites the previous artifact.
    pub fn log_artifact_bytes(
        &mut self,
        bytes: Vec<u8>,
        artifact_id: impl Into<String>,
        filename: impl Into<String>,
        kind: ArtifactKind,
    ) {
        let id = artifact_id.into();
        let artifact = Artifact::new(id.clone(), filename, kind, bytes);
        self.artifacts.insert(id, artifact);
    }

    /// Log an artifact by reading a file; the stored filename is the file's
    /// basename.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or `Error::Other`
    /// if the path has no filename component.
    pub fn log_artifact_file(
        &mut self,
        path: impl AsRef<Path>,
        artifact_id: impl Into<String>,
        kind: ArtifactKind,
    ) -> Result<()> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Other(format!("path has no filename: {}", path.display())))?
            .to_string();
        let bytes = std::fs::read(path)?;
        self.log_artifact_bytes(bytes, artifact_id, filename, kind);
        Ok(())
    }

    /// Log a pre-rendered raster figure (PNG bytes).
    ///
    /// Stored as `{artifact_id}.png` with kind `Png`.
    pub fn log_figure(&mut self, png_bytes: Vec<u8>, artifact_id: impl Into<String>) {
        let id = artifact_id.into();
        let filename = format!("{id}.png");
        self.log_artifact_bytes(png_bytes, id, filename, ArtifactKind::Png);
    }

    /// Log a Plotly figure from its JSON representation.
    ///
    /// Stored as `{artifact_id}.plotly.json` with kind `PlotlyJson`.
    pub fn log_plotly_figure(&mut self, figure_json: &str, artifact_id: impl Into<String>) {
        let id = artifact_id.into();
        let filename = format!("{id}.plotly.json");
        self.log_artifact_bytes(
            figure_json.as_bytes().to_vec(),
            id,
            filename,
            ArtifactKind::PlotlyJson,
        );
    }

    /// Log a PNG image. The filename defaults to the artifact id.
    pub fn log_image(
        &mut self,
        bytes: Vec<u8>,
        artifact_id: impl Into<String>,
        filename: Option<&str>,
    ) {
        let id = artifact_id.into();
        let filename = filename.map_or_else(|| id.clone(), ToString::to_string);
        self.log_artifact_bytes(bytes, id, filename, ArtifactKind::Png);
    }

    /// Log a text block.
    ///
    /// Stored as a `Binary` artifact whose filename is the artifact id;
    /// comparison reports render it back as text.
    pub fn log_text(&mut self, text: &str, artifact_id: impl Into<String>) {
        let id = artifact_id.into();
        self.log_artifact_bytes(
            text.as_bytes().to_vec(),
            id.clone(),
            id,
            ArtifactKind::Binary,
        );
    }
}

/// Builder for `ExperimentRun`.
#[derive(Debug)]
pub struct ExperimentRunBuilder {
    experiment_id: String,
    variant_id: String,
    run_id: Option<String>,
    timestamp_utc: DateTime<Utc>,
}

impl ExperimentRunBuilder {
    /// Create a new builder for the given experiment.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            variant_id: "main".to_string(),
            run_id: None,
            timestamp_utc: Utc::now(),
        }
    }

    /// Set the variant id.
    #[must_use]
    pub fn variant_id(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = variant_id.into();
        self
    }

    /// Set an explicit run id instead of deriving one from the timestamp.
    #[must_use]
    pub fn run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Set a custom timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn timestamp_utc(mut self, timestamp_utc: DateTime<Utc>) -> Self {
        self.timestamp_utc = timestamp_utc;
        self
    }

    /// Build the `ExperimentRun`.
    #[must_use]
    pub fn build(self) -> ExperimentRun {
        let run_id = self
            .run_id
            .unwrap_or_else(|| self.timestamp_utc.format(RUN_ID_TIMESTAMP_FORMAT).to_string());
        ExperimentRun {
            experiment_id: self.experiment_id,
            variant_id: self.variant_id,
            run_id,
            timestamp_utc: self.timestamp_utc,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            dicts: BTreeMap::new(),
            artifacts: BTreeMap::new(),
        }
    }
}
