//! Session storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::DocumentBackend;
use crate::controller::InteractionController;

/// A single chat session.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// Controller owning this chat's state.
    controller: InteractionController,
    /// Session creation time.
    created_at: DateTime<Utc>,
    /// Last activity time.
    last_activity: RwLock<DateTime<Utc>>,
}

impl Session {
    fn new(id: String, controller: InteractionController) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                controller,
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The controller for this chat.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.inner.controller
    }

    /// Update the last activity timestamp.
    pub fn touch(&self) {
        *self
            .inner
            .last_activity
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Utc::now();
    }

    /// Check if the session has been idle longer than `timeout`.
    ///
    /// A session with a request in flight never counts as idle.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        if self.inner.controller.loading() {
            return false;
        }
        let last = *self
            .inner
            .last_activity
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        // Negative duration means clock skew.
        (Utc::now() - last)
            .to_std()
            .is_ok_and(|idle| idle > timeout)
    }

    /// Get the session age.
    #[must_use]
    pub fn age(&self) -> Duration {
        (Utc::now() - self.inner.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, by: Duration) {
        let by = chrono::Duration::from_std(by).unwrap();
        *self.inner.last_activity.write().unwrap() -= by;
    }
}

/// Thread-safe store for sessions.
///
/// Every session created here talks to the same backend.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    sessions: RwLock<HashMap<String, Session>>,
    backend: Arc<dyn DocumentBackend>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.len())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a new session store.
    #[must_use]
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
                backend,
            }),
        }
    }

    /// Create a new session with an empty chat.
    #[must_use]
    pub fn create(&self) -> Session {
        let id = Uuid::new_v4().to_string();
        let controller = InteractionController::new(Arc::clone(&self.inner.backend));
        let session = Session::new(id.clone(), controller);
        self.inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session.clone());
        tracing::info!(name: "session.created", session_id = %session.id(), "Session created");
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Session> {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Get the number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove sessions that have been inactive longer than the timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self, timeout: Duration) -> usize {
        let mut guard = self
            .inner
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|id, session| {
            let expired = session.is_expired_with_timeout(timeout);
            if expired {
                tracing::info!(
                    name: "session.expired",
                    session_id = %id,
                    age_secs = session.age().as_secs(),
                    "Session expired"
                );
            }
            !expired
        });
        before - guard.len()
    }
}
