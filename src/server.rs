//! HTTP server for the chat page.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | New chat session, full page |
//! | `POST` | `/sessions/{id}/upload` | Upload files (multipart, field `files`) |
//! | `POST` | `/sessions/{id}/query` | Ask a question (form field `query`) |
//! | `GET`  | `/sessions/{id}/panel` | Current chat panel fragment |
//! | `GET`  | `/health` | Health check |
//! | `GET`  | `/static/*` | Static assets |
//!
//! Requests carrying `HX-Request: true` get the `#chat-panel` fragment back;
//! plain form posts get the full page. HTMX requests for an expired session
//! get an `HX-Redirect` to a fresh chat.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State, multipart::MultipartError},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use thiserror::Error;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::backend::{HttpBackend, SelectedFile};
use crate::config::AppConfig;
use crate::session::{Session, SessionStore};
use crate::ui;

/// Multipart field carrying the selected files.
const FILES_FIELD: &str = "files";

/// Response header telling HTMX to navigate instead of swapping.
const HX_REDIRECT: &str = "hx-redirect";

/// Where HTMX requests for an expired session are sent.
pub const EXPIRED_REDIRECT: &str = "/?expired=true";

/// Errors surfaced by the page handlers.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Unknown or expired session id.
    #[error("session not found: {id}")]
    SessionNotFound {
        /// Session id from the path.
        id: String,
        /// The request came from HTMX, which does not swap 4xx bodies.
        htmx: bool,
    },

    /// The browser sent a malformed multipart body.
    #[error("failed to read upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::SessionNotFound { id, htmx } => {
                tracing::debug!(session_id = %id, htmx, "Request for unknown session");
                let mut response = (
                    StatusCode::NOT_FOUND,
                    Html(ui::notice_page(
                        "This chat session has expired. Start a new chat to continue.",
                    )),
                )
                    .into_response();
                if htmx {
                    response.headers_mut().insert(
                        HX_REDIRECT,
                        HeaderValue::from_static(EXPIRED_REDIRECT),
                    );
                }
                response
            }
            Self::Multipart(e) => {
                tracing::warn!(error = %e, "Malformed upload");
                let message = format!("The upload could not be read: {}", e.body_text());
                (e.status(), Html(ui::notice_page(&message))).into_response()
            }
        }
    }
}

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let backend = Arc::new(HttpBackend::new(&config.backend.base_url)?);
    info!(
        name: "backend.config.loaded",
        base_url = %backend.base_url(),
        "Document service configured"
    );

    let sessions = SessionStore::new(backend);
    spawn_session_reaper(sessions.clone(), config.session.idle_timeout());

    let state = AppState {
        sessions,
        config: Arc::clone(&config),
    };

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);
    let body_limit = state.config.upload.max_body_bytes;

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/sessions/{id}/upload", post(upload_handler))
        .route("/sessions/{id}/query", post(query_handler))
        .route("/sessions/{id}/panel", get(panel_handler))
        .nest_service("/static", static_dir)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically drop sessions idle longer than `idle_timeout`.
fn spawn_session_reaper(sessions: SessionStore, idle_timeout: Duration) {
    let period = idle_timeout.clamp(Duration::from_secs(1), Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let removed = sessions.cleanup_expired(idle_timeout);
            if removed > 0 {
                tracing::debug!(removed, remaining = sessions.len(), "Expired sessions removed");
            }
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Query string of the index page.
#[derive(Debug, Default, Deserialize)]
struct IndexParams {
    /// Set when an expired session sent the browser here.
    #[serde(default)]
    expired: bool,
}

/// GET / - Start a fresh chat.
async fn index_handler(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    let session = state.sessions.create();
    let notice = params
        .expired
        .then_some("Your previous chat session expired. A new chat has been started.");
    Html(ui::page_with_notice(
        session.id(),
        &session.controller().snapshot(),
        notice,
    ))
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len(),
    }))
}

/// POST /sessions/{id}/upload - Forward the picked files to the ingestion
/// endpoint.
#[tracing::instrument(skip_all, fields(session_id = %id))]
async fn upload_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, ServerError> {
    let session = find_session(&state.sessions, &id, &headers)?;

    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        // Browsers send one empty, unnamed part when nothing was picked.
        let Some(name) = field.file_name().filter(|n| !n.is_empty()).map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        let mut file = SelectedFile::new(name, bytes.to_vec());
        if let Some(content_type) = content_type.filter(|c| c != "application/octet-stream") {
            file = file.with_content_type(content_type);
        }
        files.push(file);
    }

    tracing::info!(file_count = files.len(), "Upload received");
    let outcome = session.controller().submit_upload(files).await;
    tracing::debug!(outcome = ?outcome, "Upload flow finished");

    Ok(render(&session, &headers))
}

/// Form body of the query form.
#[derive(Debug, Deserialize)]
struct QueryForm {
    #[serde(default)]
    query: String,
}

/// POST /sessions/{id}/query - Ask the question-answering endpoint.
#[tracing::instrument(skip_all, fields(session_id = %id))]
async fn query_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<QueryForm>,
) -> Result<Response, ServerError> {
    let session = find_session(&state.sessions, &id, &headers)?;

    let outcome = session.controller().submit_query(&form.query).await;
    tracing::debug!(outcome = ?outcome, "Query flow finished");

    Ok(render(&session, &headers))
}

/// GET /sessions/{id}/panel - Re-render the chat panel.
async fn panel_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    let session = find_session(&state.sessions, &id, &headers)?;
    Ok(Html(ui::chat::chat_panel(
        session.id(),
        &session.controller().snapshot(),
    )))
}

fn find_session(
    sessions: &SessionStore,
    id: &str,
    headers: &HeaderMap,
) -> Result<Session, ServerError> {
    let session = sessions
        .get(id)
        .ok_or_else(|| ServerError::SessionNotFound {
            id: id.to_string(),
            htmx: is_htmx(headers),
        })?;
    session.touch();
    Ok(session)
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Panel fragment for HTMX, full page otherwise.
fn render(session: &Session, headers: &HeaderMap) -> Response {
    let state = session.controller().snapshot();
    let html = if is_htmx(headers) {
        ui::chat::chat_panel(session.id(), &state)
    } else {
        ui::page(session.id(), &state)
    };
    Html(html).into_response()
}
