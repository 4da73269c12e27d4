//! Application context
//!
//! The explicit container for everything a page handler needs: settings,
//! services, the session state and the client stores. Built once at startup
//! and passed by reference.

use std::sync::Arc;
use crate::config::Settings;
use crate::middleware::auth::SessionGuard;
use crate::models::Session;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use super::courses::{ActiveCourseStore, EnrolledCoursesStore};
use super::session::SessionState;
use super::ui::ToggleStore;

/// Application-wide context containing services, settings and stores
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub services: Arc<ServiceFactory>,
    pub session: SessionState,
    pub enrolled_courses: EnrolledCoursesStore,
    pub active_course: ActiveCourseStore,
    pub sidebar: ToggleStore,
    pub mobile_nav: ToggleStore,
}

impl AppContext {
    /// Create the context, connecting the configured cache backend
    pub async fn new(settings: Settings) -> Result<Self> {
        let services = ServiceFactory::new(&settings).await?;
        Ok(Self::from_services(settings, services))
    }

    /// Create the context around already-built services
    pub fn from_services(settings: Settings, services: ServiceFactory) -> Self {
        Self {
            settings: Arc::new(settings),
            services: Arc::new(services),
            session: SessionState::new(),
            enrolled_courses: EnrolledCoursesStore::new(),
            active_course: ActiveCourseStore::new(),
            sidebar: ToggleStore::new(true),
            mobile_nav: ToggleStore::new(false),
        }
    }

    /// Guard that signs out sessions whose refresh failed
    pub fn session_guard(&self) -> SessionGuard {
        SessionGuard::new(
            self.session.clone(),
            self.services.auth_service.clone(),
            self.enrolled_courses.clone(),
            self.active_course.clone(),
        )
    }

    /// Make `session` current. Course stores are emptied first when it
    /// belongs to a different learner than the current session.
    pub fn sign_in(&self, session: Session) -> bool {
        let previous_user = self.session.session().map(|current| current.user_id);
        if previous_user.as_deref() != Some(session.user_id.as_str()) {
            self.reset_course_stores();
        }
        self.session.sign_in(session)
    }

    /// End the current session locally and, best effort, remotely
    pub async fn sign_out(&self) {
        self.reset_course_stores();
        if let Some(session) = self.session.session() {
            self.session.clear();
            let _ = self.services.auth_service.sign_out(&session).await;
        } else {
            self.session.clear();
        }
    }

    /// Drop every learner-scoped value from the client stores
    pub fn reset_course_stores(&self) {
        self.enrolled_courses.reset();
        self.active_course.reset();
    }
}
