//! Artifact - binary payload attached to a run

use serde::{Deserialize, Serialize};

/// Kind of a stored artifact, driving persistence filenames and
/// comparison-report rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// PNG raster image
    Png,
    /// JPEG raster image
    Jpeg,
    /// Plotly figure serialized as JSON
    PlotlyJson,
    /// HTML fragment, inlined verbatim into reports
    Html,
    /// Opaque bytes; rendered as text when valid UTF-8
    Binary,
}

impl ArtifactKind {
    /// MIME type for image kinds, used for data-URI embedding.
    #[must_use]
    pub const fn mime_type(self) -> Option<&'static str> {
        match self {
            Self::Png => Some("image/png"),
            Self::Jpeg => Some("image/jpeg"),
            Self::PlotlyJson | Self::Html | Self::Binary => None,
        }
    }

    /// Whether this kind is an inline-embeddable raster image.
    #[must_use]
    pub const fn is_image(self) -> bool {
        matches!(self, Self::Png | Self::Jpeg)
    }
}

/// Artifact represents a named binary payload logged against a run.
///
/// The byte payload lives in memory while the run is being built and is
/// persisted as a separate file under the run's `artifacts/` directory;
/// only the id, filename, and kind go into the run metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    id: String,
    filename: String,
    kind: ArtifactKind,
    bytes: Vec<u8>,
}

impl Artifact {
    /// Create a new artifact.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier the artifact is keyed by within the run
    /// * `filename` - Filename the payload is persisted under
    /// * `kind` - Artifact kind
    /// * `bytes` - The payload
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        kind: ArtifactKind,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            kind,
            bytes,
        }
    }

    /// Get the artifact id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the filename the payload is persisted under.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the artifact kind.
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// Get the payload bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the payload size in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_new() {
        let artifact = Artifact::new("confusion", "confusion.png", ArtifactKind::Png, vec![1, 2]);
        assert_eq!(artifact.id(), "confusion");
        assert_eq!(artifact.filename(), "confusion.png");
        assert_eq!(artifact.kind(), ArtifactKind::Png);
        assert_eq!(artifact.bytes(), &[1, 2]);
        assert_eq!(artifact.size_bytes(), 2);
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&ArtifactKind::PlotlyJson).unwrap(),
            "\"plotly_json\""
        );
        assert_eq!(serde_json::to_string(&ArtifactKind::Png).unwrap(), "\"png\"");
        let kind: ArtifactKind = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(kind, ArtifactKind::Binary);
    }

    #[test]
    fn test_kind_mime_types() {
        assert_eq!(ArtifactKind::Png.mime_type(), Some("image/png"));
        assert_eq!(ArtifactKind::Jpeg.mime_type(), Some("image/jpeg"));
        assert_eq!(ArtifactKind::Binary.mime_type(), None);
        assert!(ArtifactKind::Jpeg.is_image());
        assert!(!ArtifactKind::Html.is_image());
    }
}
