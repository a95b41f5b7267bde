//! A session shared between concurrent callers.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::Result;
use crate::oauth::Authenticator;
use crate::session::Session;

/// Lock-protected session with single-flight refresh.
///
/// Readers take a snapshot with [`current`](Self::current). A caller whose
/// request was rejected hands the rejected token to
/// [`refresh_if_stale`](Self::refresh_if_stale); only one refresh runs at a
/// time, and callers that queued behind it reuse its result.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    authenticator: Authenticator,
    session: RwLock<Session>,
    refresh_gate: Mutex<()>,
}

impl SharedSession {
    /// Wrap a session produced by `authenticator`.
    pub fn new(authenticator: Authenticator, session: Session) -> Self {
        Self {
            inner: Arc::new(Inner {
                authenticator,
                session: RwLock::new(session),
                refresh_gate: Mutex::new(()),
            }),
        }
    }

    /// The authenticator used for refreshes.
    pub fn authenticator(&self) -> &Authenticator {
        &self.inner.authenticator
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Session {
        self.inner.session.read().await.clone()
    }

    /// Refresh the session unless someone already replaced `rejected_token`.
    ///
    /// Returns the session to retry with. A failed refresh leaves the stored
    /// session untouched.
    pub async fn refresh_if_stale(&self, rejected_token: &str) -> Result<Session> {
        let _gate = self.inner.refresh_gate.lock().await;

        let mut session = self.current().await;
        if session.access_token() != rejected_token {
            debug!("Session already refreshed by another caller");
            return Ok(session);
        }

        self.inner.authenticator.refresh(&mut session).await?;
        *self.inner.session.write().await = session.clone();
        Ok(session)
    }
}
