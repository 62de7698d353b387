//! Shared test doubles.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use doc_qa_chat::backend::{
    Answer, BackendError, DocumentBackend, FileResult, Result, SelectedFile, UploadResult,
};

/// Backend that replays scripted responses and counts calls.
#[derive(Default)]
pub struct ScriptedBackend {
    uploads: Mutex<VecDeque<Result<UploadResult>>>,
    answers: Mutex<VecDeque<Result<Answer>>>,
    pub upload_calls: AtomicUsize,
    pub answer_calls: AtomicUsize,
    pub received_files: Mutex<Vec<String>>,
    pub received_queries: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_upload(&self, result: Result<UploadResult>) -> &Self {
        self.uploads.lock().unwrap().push_back(result);
        self
    }

    pub fn push_answer(&self, result: Result<Answer>) -> &Self {
        self.answers.lock().unwrap().push_back(result);
        self
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn answer_calls(&self) -> usize {
        self.answer_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DocumentBackend for ScriptedBackend {
    async fn upload(&self, files: &[SelectedFile]) -> Result<UploadResult> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.received_files
            .lock()
            .unwrap()
            .extend(files.iter().map(|f| f.name.clone()));
        self.uploads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ok_upload(files)))
    }

    async fn answer(&self, query: &str) -> Result<Answer> {
        self.answer_calls.fetch_add(1, Ordering::SeqCst);
        self.received_queries.lock().unwrap().push(query.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500)))
    }
}

/// Success response listing every file as "ok".
pub fn ok_upload(files: &[SelectedFile]) -> UploadResult {
    UploadResult {
        message: format!("{} files processed", files.len()),
        error: None,
        results: files
            .iter()
            .map(|f| FileResult {
                filename: f.name.clone(),
                status: "ok".into(),
                message: None,
                processed_chunks: None,
            })
            .collect(),
    }
}

pub fn answer(text: &str, sources: Option<&str>) -> Answer {
    Answer {
        answer: text.into(),
        sources: sources.map(str::to_string),
    }
}

pub fn api_error(status: u16) -> BackendError {
    BackendError::Api {
        status,
        message: "Internal Server Error".into(),
    }
}

pub fn decode_error() -> BackendError {
    BackendError::Decode(serde_json::from_str::<Answer>("{}").unwrap_err())
}

pub fn file(name: &str) -> SelectedFile {
    SelectedFile::new(name, format!("contents of {name}").into_bytes())
}
