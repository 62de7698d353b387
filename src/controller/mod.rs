//! Interaction controller for the document chat.
//!
//! Owns one [`ChatState`] and runs the two request flows against a
//! [`DocumentBackend`]:
//!
//! - [`InteractionController::submit_upload`]: post files to the ingestion
//!   endpoint and record the aggregated result
//! - [`InteractionController::submit_query`]: append the question, ask the
//!   answer endpoint and append the answer (or a failure notice)
//!
//! Both flows share one loading flag. While a request is outstanding every
//! other submission is rejected, which keeps the message history strictly
//! alternating between user turns and their replies.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use doc_qa_chat::backend::{HttpBackend, SelectedFile};
//! use doc_qa_chat::controller::InteractionController;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = Arc::new(HttpBackend::new("http://localhost:8000")?);
//! let controller = InteractionController::new(backend);
//!
//! controller
//!     .submit_upload(vec![SelectedFile::new("policy.pdf", std::fs::read("policy.pdf")?)])
//!     .await;
//! controller.submit_query("What is the refund policy?").await;
//!
//! for message in controller.snapshot().messages {
//!     println!("{}", message.content());
//! }
//! # Ok(())
//! # }
//! ```

mod state;

pub use state::{
    ChatMessage, ChatState, Flow, FlowPhase, QUERY_FAILURE_NOTICE, UploadedFileRef,
};

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::backend::{DocumentBackend, SelectedFile, UploadResult};

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Nothing to do (blank query, no files selected, or no files uploaded
    /// yet for a query). State is untouched.
    Ignored,
    /// Another request was outstanding. State is untouched.
    Rejected,
    /// The backend answered with a decodable response.
    Succeeded,
    /// Transport failure, non-success status or undecodable body.
    Failed,
}

/// Drives the upload and query flows over a shared [`ChatState`].
///
/// Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct InteractionController {
    state: Arc<RwLock<ChatState>>,
    backend: Arc<dyn DocumentBackend>,
}

impl std::fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionController")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}

impl InteractionController {
    /// Create a controller with an empty chat.
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ChatState::default())),
            backend,
        }
    }

    /// Copy of the current state, for rendering.
    pub fn snapshot(&self) -> ChatState {
        self.read().clone()
    }

    /// Whether a request is outstanding.
    pub fn loading(&self) -> bool {
        self.read().loading()
    }

    /// Upload the selected files.
    ///
    /// On success the decoded response becomes the new upload status and the
    /// files are appended to the uploaded list. On failure the upload status
    /// becomes a synthetic `"Upload failed"` record carrying the error text
    /// and the file list is left as it was.
    pub async fn submit_upload(&self, files: Vec<SelectedFile>) -> FlowOutcome {
        if files.is_empty() {
            return FlowOutcome::Ignored;
        }

        let Some(guard) = SendingGuard::begin(&self.state, Flow::Upload, |_| true) else {
            tracing::warn!(file_count = files.len(), "Upload rejected: request in flight");
            return FlowOutcome::Rejected;
        };

        let result = self.backend.upload(&files).await;

        match result {
            Ok(status) => {
                tracing::info!(
                    name: "upload.settled",
                    file_count = files.len(),
                    result_count = status.results.len(),
                    message = %status.message,
                    "Upload succeeded"
                );
                guard.settle(|state| {
                    state.upload_status = Some(status);
                    state.files.extend(files.iter().map(UploadedFileRef::from));
                });
                FlowOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!(
                    name: "upload.settled",
                    file_count = files.len(),
                    error = %e,
                    "Upload failed"
                );
                guard.settle(|state| {
                    state.upload_status = Some(UploadResult::failed(e.to_string()));
                });
                FlowOutcome::Failed
            }
        }
    }

    /// Ask a question about the uploaded documents.
    ///
    /// A blank query, or a query before any file was uploaded, is silently
    /// ignored. Otherwise a `user` message is appended immediately, followed
    /// by exactly one `assistant` or `error` message once the backend settles.
    pub async fn submit_query(&self, text: &str) -> FlowOutcome {
        if text.trim().is_empty() {
            return FlowOutcome::Ignored;
        }

        let mut has_files = true;
        let guard = SendingGuard::begin(&self.state, Flow::Query, |state| {
            has_files = !state.files.is_empty();
            if has_files {
                state.messages.push(ChatMessage::user(text));
            }
            has_files
        });
        let Some(guard) = guard else {
            if !has_files {
                tracing::debug!("Query ignored: no documents uploaded");
                return FlowOutcome::Ignored;
            }
            tracing::warn!("Query rejected: request in flight");
            return FlowOutcome::Rejected;
        };

        match self.backend.answer(text).await {
            Ok(answer) => {
                tracing::info!(
                    name: "query.settled",
                    answer_length = answer.answer.len(),
                    has_sources = answer.sources.is_some(),
                    "Query answered"
                );
                guard.settle(|state| {
                    state
                        .messages
                        .push(ChatMessage::assistant(answer.answer, answer.sources));
                });
                FlowOutcome::Succeeded
            }
            Err(e) => {
                tracing::error!(name: "query.settled", error = %e, "Query failed");
                guard.settle(|state| {
                    state.messages.push(ChatMessage::error(QUERY_FAILURE_NOTICE));
                });
                FlowOutcome::Failed
            }
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ChatState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write(state: &RwLock<ChatState>) -> RwLockWriteGuard<'_, ChatState> {
    state.write().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the `Sending` phase for one request.
///
/// Dropping the guard without settling (the request future was cancelled)
/// still returns the state to `Idle`.
struct SendingGuard<'a> {
    state: &'a RwLock<ChatState>,
    armed: bool,
}

impl<'a> SendingGuard<'a> {
    /// Move `Idle -> Sending` if `admit` accepts the current state.
    ///
    /// `admit` runs under the write lock and may mutate state; it is only
    /// called when no request is outstanding.
    fn begin(
        state: &'a RwLock<ChatState>,
        flow: Flow,
        admit: impl FnOnce(&mut ChatState) -> bool,
    ) -> Option<Self> {
        let mut guard = write(state);
        if guard.loading() || !admit(&mut *guard) {
            return None;
        }
        guard.phase = FlowPhase::Sending(flow);
        tracing::debug!(flow = ?flow, "Request sending");
        Some(Self { state, armed: true })
    }

    /// Apply the request result and return to `Idle` in one step.
    fn settle(mut self, apply: impl FnOnce(&mut ChatState)) {
        let mut guard = write(self.state);
        apply(&mut *guard);
        guard.phase = FlowPhase::Idle;
        self.armed = false;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Request dropped before settling");
            write(self.state).phase = FlowPhase::Idle;
        }
    }
}
