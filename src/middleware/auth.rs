//! Authentication middleware
//!
//! Session validity checks run before authenticated API calls, and the
//! session guard that forces a sign-out when a token refresh has failed.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use crate::models::Session;
use crate::services::AuthService;
use crate::state::courses::{ActiveCourseStore, EnrolledCoursesStore};
use crate::state::session::SessionState;
use crate::utils::errors::{ApiError, ApiResult};
use crate::utils::logging::log_session_event;

/// Bearer token of a usable session, or `AuthInvalid` when its refresh failed
pub fn require_valid_session(session: &Session) -> ApiResult<&str> {
    if session.is_valid() {
        Ok(&session.access_token)
    } else {
        debug!(user_id = %session.user_id, "Rejecting authenticated call for invalid session");
        Err(ApiError::AuthInvalid)
    }
}

/// Emitted when the guard signs a learner out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignOutEvent {
    pub user_id: String,
    pub redirect_to: String,
}

/// Forces sign-out for sessions carrying the refresh-failure marker
#[derive(Debug, Clone)]
pub struct SessionGuard {
    state: SessionState,
    auth: AuthService,
    enrolled_courses: EnrolledCoursesStore,
    active_course: ActiveCourseStore,
}

impl SessionGuard {
    pub fn new(
        state: SessionState,
        auth: AuthService,
        enrolled_courses: EnrolledCoursesStore,
        active_course: ActiveCourseStore,
    ) -> Self {
        Self {
            state,
            auth,
            enrolled_courses,
            active_course,
        }
    }

    /// Sign out if the current session's refresh failed.
    ///
    /// The invalid snapshot is claimed atomically, so concurrent checks
    /// produce one sign-out and one event.
    pub async fn check(&self) -> Option<SignOutEvent> {
        let session = self.state.take_invalid()?;
        Some(self.force_sign_out(&session).await)
    }

    async fn force_sign_out(&self, session: &Session) -> SignOutEvent {
        warn!(user_id = %session.user_id, "Session refresh failed, forcing sign-out");

        self.enrolled_courses.reset();
        self.active_course.reset();
        // remote failure is already logged; the local session is gone regardless
        let _ = self.auth.sign_out(session).await;
        log_session_event(Some(&session.user_id), "forced_sign_out", Some(self.auth.login_path()));

        SignOutEvent {
            user_id: session.user_id.clone(),
            redirect_to: self.auth.login_path().to_string(),
        }
    }

    /// Run the check every time the session snapshot changes.
    ///
    /// The task ends when the session state is dropped or the event receiver
    /// goes away.
    pub fn spawn(self, events: mpsc::Sender<SignOutEvent>) -> JoinHandle<()> {
        let mut rx = self.state.subscribe();

        tokio::spawn(async move {
            loop {
                rx.borrow_and_update();
                if let Some(event) = self.check().await {
                    if events.send(event).await.is_err() {
                        break;
                    }
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
