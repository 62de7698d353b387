//! Chat state record and its transitions.

use serde::Serialize;

use crate::backend::{SelectedFile, UploadResult};

/// Fixed notice appended when a query fails.
pub const QUERY_FAILURE_NOTICE: &str = "Failed to get response";

/// Metadata for a file the user has successfully uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFileRef {
    pub name: String,
    pub size: usize,
    pub content_type: String,
}

impl From<&SelectedFile> for UploadedFileRef {
    fn from(file: &SelectedFile) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size(),
            content_type: file.content_type.clone(),
        }
    }
}

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatMessage {
    /// Text typed by the user.
    User { content: String },
    /// Answer from the question-answering endpoint.
    Assistant {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        sources: Option<String>,
    },
    /// Failure notice.
    Error { content: String },
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Option<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            sources,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::Error {
            content: content.into(),
        }
    }

    /// Message text, regardless of variant.
    pub fn content(&self) -> &str {
        match self {
            Self::User { content } | Self::Assistant { content, .. } | Self::Error { content } => {
                content
            }
        }
    }

    /// Source citations, for assistant messages that carry them.
    pub fn sources(&self) -> Option<&str> {
        match self {
            Self::Assistant { sources, .. } => sources.as_deref(),
            _ => None,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User { .. })
    }
}

/// Which request flow is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Upload,
    Query,
}

/// Request lifecycle.
///
/// `Idle -> Sending -> {Succeeded, Failed} -> Idle`. The terminal states are
/// transient: settling a request applies its result and returns to `Idle`
/// under the same lock, so only `Idle` and `Sending` are ever observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", content = "flow", rename_all = "lowercase")]
pub enum FlowPhase {
    #[default]
    Idle,
    Sending(Flow),
}

/// Everything the chat page renders from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatState {
    /// Successfully uploaded files, in upload order.
    pub files: Vec<UploadedFileRef>,
    /// Conversation history, append-only.
    pub messages: Vec<ChatMessage>,
    /// Latest upload outcome; replaced on every upload.
    pub upload_status: Option<UploadResult>,
    /// Current request lifecycle phase.
    pub phase: FlowPhase,
}

impl ChatState {
    /// Whether a request is outstanding.
    pub fn loading(&self) -> bool {
        matches!(self.phase, FlowPhase::Sending(_))
    }

    /// The query form accepts input only once a file is uploaded and while
    /// nothing is in flight.
    pub fn query_enabled(&self) -> bool {
        !self.files.is_empty() && !self.loading()
    }

    /// The upload input accepts files while nothing is in flight.
    pub fn upload_enabled(&self) -> bool {
        !self.loading()
    }
}
