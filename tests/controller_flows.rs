mod common;

use std::sync::Arc;

use common::{ScriptedBackend, answer, api_error, decode_error, file};
use doc_qa_chat::backend::{
    Answer, DocumentBackend, FileResult, Result, SelectedFile, UploadResult,
};
use doc_qa_chat::controller::{
    ChatMessage, Flow, FlowOutcome, FlowPhase, InteractionController, QUERY_FAILURE_NOTICE,
};
use tokio::sync::Notify;

fn controller(backend: &Arc<ScriptedBackend>) -> InteractionController {
    InteractionController::new(Arc::clone(backend) as Arc<dyn DocumentBackend>)
}

/// Controller with one file already uploaded.
async fn ready_controller(backend: &Arc<ScriptedBackend>) -> InteractionController {
    let controller = controller(backend);
    assert_eq!(
        controller.submit_upload(vec![file("policy.pdf")]).await,
        FlowOutcome::Succeeded
    );
    controller
}

// ─────────────────────────────────────────────────────────────────────────────
// Upload flow
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_two_files_success() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_upload(Ok(UploadResult {
        message: "2 files processed".into(),
        error: None,
        results: vec![
            FileResult {
                filename: "a.pdf".into(),
                status: "ok".into(),
                message: None,
                processed_chunks: None,
            },
            FileResult {
                filename: "b.txt".into(),
                status: "ok".into(),
                message: None,
                processed_chunks: None,
            },
        ],
    }));
    let controller = controller(&backend);

    let outcome = controller
        .submit_upload(vec![file("a.pdf"), file("b.txt")])
        .await;

    assert_eq!(outcome, FlowOutcome::Succeeded);
    let state = controller.snapshot();
    let status = state.upload_status.as_ref().expect("upload status set");
    assert!(status.error.is_none());
    assert_eq!(status.message, "2 files processed");
    assert_eq!(status.results.len(), 2);

    let names: Vec<&str> = state.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["a.pdf", "b.txt"]);
    assert_eq!(state.files[0].content_type, "application/pdf");
    assert_eq!(state.files[1].content_type, "text/plain");
    assert_eq!(state.files[0].size, "contents of a.pdf".len());
    assert!(!state.loading());
}

#[tokio::test]
async fn test_upload_failure_keeps_files_and_records_error() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_upload(Err(api_error(503)));
    let controller = controller(&backend);

    let outcome = controller.submit_upload(vec![file("a.pdf")]).await;

    assert_eq!(outcome, FlowOutcome::Failed);
    let state = controller.snapshot();
    assert!(state.files.is_empty());
    let status = state.upload_status.as_ref().expect("failure recorded");
    assert_eq!(status.message, "Upload failed");
    assert!(status.error.as_deref().unwrap().contains("503"));
    assert!(!state.loading());
    assert!(!state.query_enabled());
}

#[tokio::test]
async fn test_upload_always_clears_loading() {
    let backend = Arc::new(ScriptedBackend::new());
    backend
        .push_upload(Ok(common::ok_upload(&[file("a.pdf")])))
        .push_upload(Err(api_error(500)))
        .push_upload(Err(decode_error()));
    let controller = controller(&backend);

    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        controller.submit_upload(vec![file(name)]).await;
        assert!(!controller.loading(), "loading left set after {name}");
        assert_eq!(controller.snapshot().phase, FlowPhase::Idle);
    }
    assert_eq!(backend.upload_calls(), 3);
}

#[tokio::test]
async fn test_uploads_accumulate_in_order() {
    let backend = Arc::new(ScriptedBackend::new());
    let controller = controller(&backend);

    controller
        .submit_upload(vec![file("a.pdf"), file("b.txt")])
        .await;
    controller
        .submit_upload(vec![file("c.pdf"), file("a.pdf")])
        .await;

    let names: Vec<String> = controller
        .snapshot()
        .files
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["a.pdf", "b.txt", "c.pdf", "a.pdf"]);
}

#[tokio::test]
async fn test_latest_upload_status_replaces_previous() {
    let backend = Arc::new(ScriptedBackend::new());
    backend
        .push_upload(Err(api_error(500)))
        .push_upload(Ok(common::ok_upload(&[file("b.txt")])));
    let controller = controller(&backend);

    controller.submit_upload(vec![file("a.pdf")]).await;
    assert!(controller.snapshot().upload_status.unwrap().error.is_some());

    controller.submit_upload(vec![file("b.txt")]).await;
    let status = controller.snapshot().upload_status.unwrap();
    assert!(status.error.is_none());
    assert_eq!(status.results[0].filename, "b.txt");
}

#[tokio::test]
async fn test_empty_upload_is_ignored() {
    let backend = Arc::new(ScriptedBackend::new());
    let controller = controller(&backend);

    assert_eq!(controller.submit_upload(Vec::new()).await, FlowOutcome::Ignored);
    assert_eq!(backend.upload_calls(), 0);
    assert!(controller.snapshot().upload_status.is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Query flow
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_query_success_appends_user_then_assistant() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_answer(Ok(answer("30 days.", Some("policy.pdf p.2"))));
    let controller = ready_controller(&backend).await;
    let before = controller.snapshot().messages.len();

    let outcome = controller.submit_query("What is the refund policy?").await;

    assert_eq!(outcome, FlowOutcome::Succeeded);
    let messages = controller.snapshot().messages;
    assert_eq!(messages.len(), before + 2);
    assert_eq!(
        messages[before],
        ChatMessage::user("What is the refund policy?")
    );
    let last = messages.last().unwrap();
    assert_eq!(
        last,
        &ChatMessage::assistant("30 days.", Some("policy.pdf p.2".into()))
    );
    assert_eq!(last.content(), "30 days.");
    assert_eq!(last.sources(), Some("policy.pdf p.2"));
    assert!(!controller.loading());
    assert_eq!(
        *backend.received_queries.lock().unwrap(),
        ["What is the refund policy?"]
    );
}

#[tokio::test]
async fn test_query_failure_appends_user_then_error() {
    let backend = Arc::new(ScriptedBackend::new());
    backend
        .push_answer(Err(api_error(500)))
        .push_answer(Err(decode_error()));
    let controller = ready_controller(&backend).await;

    for (i, query) in ["first?", "second?"].into_iter().enumerate() {
        assert_eq!(controller.submit_query(query).await, FlowOutcome::Failed);
        let messages = controller.snapshot().messages;
        assert_eq!(messages.len(), (i + 1) * 2);
        assert_eq!(messages[i * 2], ChatMessage::user(query));
        assert_eq!(messages[i * 2 + 1], ChatMessage::error(QUERY_FAILURE_NOTICE));
        assert!(!controller.loading());
    }
}

#[tokio::test]
async fn test_whitespace_query_is_noop() {
    let backend = Arc::new(ScriptedBackend::new());
    let controller = ready_controller(&backend).await;

    for query in ["", " ", "\t\n", "   \r\n  "] {
        assert_eq!(controller.submit_query(query).await, FlowOutcome::Ignored);
    }
    assert!(controller.snapshot().messages.is_empty());
    assert_eq!(backend.answer_calls(), 0);
}

#[tokio::test]
async fn test_query_without_files_is_noop() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_answer(Ok(answer("unused", None)));
    let controller = controller(&backend);
    assert!(!controller.snapshot().query_enabled());

    let outcome = controller.submit_query("What is the refund policy?").await;

    assert_eq!(outcome, FlowOutcome::Ignored);
    assert!(controller.snapshot().messages.is_empty());
    assert_eq!(backend.answer_calls(), 0);
}

#[tokio::test]
async fn test_query_without_files_after_failed_upload_is_noop() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.push_upload(Err(api_error(500)));
    let controller = controller(&backend);
    controller.submit_upload(vec![file("a.pdf")]).await;

    assert_eq!(controller.submit_query("hello?").await, FlowOutcome::Ignored);
    assert_eq!(backend.answer_calls(), 0);
}

#[tokio::test]
async fn test_messages_alternate_across_many_queries() {
    let backend = Arc::new(ScriptedBackend::new());
    for i in 0..5 {
        if i % 2 == 0 {
            backend.push_answer(Ok(answer(&format!("answer {i}"), None)));
        } else {
            backend.push_answer(Err(api_error(502)));
        }
    }
    let controller = ready_controller(&backend).await;

    for i in 0..5 {
        controller.submit_query(&format!("question {i}")).await;
    }

    let messages = controller.snapshot().messages;
    assert_eq!(messages.len(), 10);
    for pair in messages.chunks(2) {
        assert!(pair[0].is_user());
        assert!(!pair[1].is_user());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Admission control and cancellation
// ─────────────────────────────────────────────────────────────────────────────

/// Backend whose calls never complete; signals when a call has started.
#[derive(Default)]
struct HangingBackend {
    started: Notify,
}

#[async_trait::async_trait]
impl DocumentBackend for HangingBackend {
    async fn upload(&self, _files: &[SelectedFile]) -> Result<UploadResult> {
        self.started.notify_one();
        std::future::pending().await
    }

    async fn answer(&self, _query: &str) -> Result<Answer> {
        self.started.notify_one();
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_submissions_rejected_while_request_outstanding() {
    let backend = Arc::new(HangingBackend::default());
    let controller = InteractionController::new(Arc::clone(&backend) as Arc<dyn DocumentBackend>);

    let in_flight = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit_upload(vec![file("a.pdf")]).await }
    });
    backend.started.notified().await;

    assert!(controller.loading());
    assert_eq!(controller.snapshot().phase, FlowPhase::Sending(Flow::Upload));
    assert!(!controller.snapshot().upload_enabled());

    assert_eq!(
        controller.submit_upload(vec![file("b.pdf")]).await,
        FlowOutcome::Rejected
    );
    assert_eq!(controller.submit_query("anything?").await, FlowOutcome::Rejected);
    assert!(controller.snapshot().messages.is_empty());

    in_flight.abort();
    let _ = in_flight.await;
}

#[tokio::test]
async fn test_dropped_request_clears_loading() {
    let backend = Arc::new(HangingBackend::default());
    let controller = InteractionController::new(Arc::clone(&backend) as Arc<dyn DocumentBackend>);

    let in_flight = tokio::spawn({
        let controller = controller.clone();
        async move { controller.submit_upload(vec![file("a.pdf")]).await }
    });
    backend.started.notified().await;
    assert!(controller.loading());

    in_flight.abort();
    assert!(in_flight.await.unwrap_err().is_cancelled());

    let state = controller.snapshot();
    assert!(!state.loading());
    assert!(state.files.is_empty());
    assert!(state.upload_status.is_none());
}
