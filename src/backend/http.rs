//! reqwest implementation of [`DocumentBackend`].

use reqwest::multipart::{Form, Part};
use url::Url;

use super::{Answer, AnswerRequest, BackendError, DocumentBackend, Result, SelectedFile, UploadResult};

/// HTTP client for the document service.
///
/// # Example
///
/// ```rust,no_run
/// use doc_qa_chat::backend::{DocumentBackend, HttpBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new("http://localhost:8000")?;
/// let answer = backend.answer("What is the refund policy?").await?;
/// println!("{}", answer.answer);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBackend {
    /// Create a new backend client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g. "http://localhost:8000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // `Url::join` drops the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl DocumentBackend for HttpBackend {
    async fn upload(&self, files: &[SelectedFile]) -> Result<UploadResult> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)?;
            form = form.part("files", part);
        }

        tracing::debug!(file_count = files.len(), "Posting files to ingestion endpoint");

        let response = self
            .http
            .post(self.url("upload")?)
            .multipart(form)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn answer(&self, query: &str) -> Result<Answer> {
        tracing::debug!(query_length = query.len(), "Posting query to answer endpoint");

        let response = self
            .http
            .post(self.url("answer")?)
            .json(&AnswerRequest { query })
            .send()
            .await?;
        Self::decode(response).await
    }
}
