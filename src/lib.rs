//! Document Q&A Chat
//!
//! A browser chat interface for asking questions about uploaded documents.
//! Files and questions are forwarded to an external document service; this
//! crate only owns the presentation layer and its interaction state.
//!
//! # Architecture
//!
//! - **Server**: Axum, server-rendered HTML swapped in place by HTMX
//! - **Controller**: upload and query flows over one explicit chat state
//! - **Backend**: reqwest client for the ingestion and answer endpoints
//!
//! # Modules
//!
//! - [`backend`]: document service client and wire types
//! - [`config`]: layered configuration
//! - [`controller`]: interaction controller and chat state
//! - [`session`]: per-page chat sessions
//! - [`server`]: router and handlers
//! - [`ui`]: HTML rendering

pub mod backend;
pub mod config;
pub mod controller;
pub mod server;
pub mod session;
pub mod ui;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::SessionStore;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Open chat sessions.
    pub sessions: SessionStore,
    /// Global configuration.
    pub config: Arc<AppConfig>,
}
