//! Session state
//!
//! Holds the current session snapshot. Observers are woken only when the
//! snapshot actually changes, which is what drives the session guard in
//! [`crate::middleware::auth`].

use std::sync::Arc;
use tokio::sync::watch;
use crate::models::{Session, SessionUser};
use crate::utils::logging::log_session_event;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionSnapshot {
    Loading,
    Authenticated(Session),
    Unauthenticated,
}

/// What pages read to decide which chrome to render
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub user: Option<SessionUser>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    tx: Arc<watch::Sender<SessionSnapshot>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// New state in the `Loading` phase
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::Loading);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the snapshot; returns whether it changed
    pub fn set(&self, snapshot: SessionSnapshot) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        })
    }

    pub fn sign_in(&self, session: Session) -> bool {
        log_session_event(Some(&session.user_id), "session_set", None);
        self.set(SessionSnapshot::Authenticated(session))
    }

    /// Drop the local session
    pub fn clear(&self) -> bool {
        self.set(SessionSnapshot::Unauthenticated)
    }

    /// Swap an authenticated snapshot whose refresh failed for
    /// `Unauthenticated` and hand back the removed session. The swap is
    /// atomic, so only one caller receives a given session.
    pub fn take_invalid(&self) -> Option<Session> {
        let mut taken = None;
        self.tx.send_if_modified(|current| match current {
            SessionSnapshot::Authenticated(session) if !session.is_valid() => {
                taken = Some(session.clone());
                *current = SessionSnapshot::Unauthenticated;
                true
            }
            _ => false,
        });
        taken
    }

    pub fn current(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        match &*self.tx.borrow() {
            SessionSnapshot::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match &*self.tx.borrow() {
            SessionSnapshot::Loading => SessionStatus {
                user: None,
                is_authenticated: false,
                is_loading: true,
            },
            SessionSnapshot::Authenticated(session) => SessionStatus {
                user: Some(session.user()),
                is_authenticated: session.is_valid(),
                is_loading: false,
            },
            SessionSnapshot::Unauthenticated => SessionStatus {
                user: None,
                is_authenticated: false,
                is_loading: false,
            },
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}
