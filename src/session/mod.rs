//! Per-page chat sessions.
//!
//! Every page load gets its own [`Session`] wrapping an
//! [`InteractionController`](crate::controller::InteractionController).
//! Sessions live in memory only; reloading the page starts a fresh chat.
//!
//! # Architecture
//!
//! - [`Session`]: one chat, identified by UUID
//! - [`SessionStore`]: thread-safe store for all open chats
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use doc_qa_chat::backend::HttpBackend;
//! use doc_qa_chat::session::SessionStore;
//!
//! let backend = Arc::new(HttpBackend::new("http://localhost:8000").unwrap());
//! let store = SessionStore::new(backend);
//! let session = store.create();
//!
//! assert!(store.get(session.id()).is_some());
//! assert!(session.controller().snapshot().messages.is_empty());
//! ```

mod store;

pub use store::{Session, SessionStore};
