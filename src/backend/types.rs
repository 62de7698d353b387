//! Wire types for the ingestion and question-answering endpoints.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Upload Types
// =============================================================================

/// A file as handed over by the browser's file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original filename.
    pub name: String,
    /// MIME type reported by the browser (or guessed from the name).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Build a selected file, guessing the content type from the filename.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let content_type = mime_guess::from_path(&name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Override the content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Per-file outcome reported by the ingestion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    pub filename: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of chunks the backend stored for this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_chunks: Option<u64>,
}

impl FileResult {
    /// Whether the backend flagged this file as failed.
    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }
}

/// Outcome of one ingestion attempt.
///
/// On success this is the decoded response body; on failure the controller
/// builds a synthetic record via [`UploadResult::failed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub results: Vec<FileResult>,
}

impl UploadResult {
    /// Synthetic record for a failed upload attempt.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            message: "Upload failed".to_string(),
            error: Some(error.into()),
            results: Vec::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

// =============================================================================
// Answer Types
// =============================================================================

/// Request body for `POST /answer`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRequest<'a> {
    pub query: &'a str,
}

/// Decoded answer from the question-answering endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub answer: String,
    /// Source citations, one per line.
    #[serde(default, deserialize_with = "deserialize_sources")]
    pub sources: Option<String>,
}

/// The backend sends sources as a newline-joined string, or as an empty list
/// when nothing matched.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSources {
    Text(String),
    List(Vec<String>),
}

fn deserialize_sources<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawSources>::deserialize(deserializer)?;
    let joined = match raw {
        None => return Ok(None),
        Some(RawSources::Text(text)) => text,
        Some(RawSources::List(items)) => items.join("\n"),
    };
    Ok((!joined.trim().is_empty()).then_some(joined))
}
