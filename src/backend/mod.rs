//! Client side of the external document service.
//!
//! The service exposes two endpoints: `POST /upload` ingests documents and
//! `POST /answer` answers a question against them. Everything behind those
//! endpoints (retrieval, indexing, generation) is out of scope here.
//!
//! - [`DocumentBackend`]: the seam the interaction controller talks through
//! - [`HttpBackend`]: reqwest implementation of the two calls

mod http;
mod types;

pub use http::HttpBackend;
pub use types::{Answer, AnswerRequest, FileResult, SelectedFile, UploadResult};

use thiserror::Error;

/// Errors from talking to the document service.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (connection refused, reset, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        message: String,
    },
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, BackendError>;

/// The two calls the interaction controller issues.
#[async_trait::async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Post the files to the ingestion endpoint.
    async fn upload(&self, files: &[SelectedFile]) -> Result<UploadResult>;

    /// Ask the question-answering endpoint.
    async fn answer(&self, query: &str) -> Result<Answer>;
}
