//! Course stores
//!
//! Enrolled-course list and active course, seeded from server-rendered data
//! and refreshable on demand.

use tokio::sync::watch;
use tracing::debug;
use crate::models::{ActiveCourse, EnrolledCourse, Session};
use crate::services::CourseService;
use crate::utils::errors::ApiResult;
use crate::utils::logging::log_api_failure;
use super::store::{Store, StoreState};

/// Learner's enrolled courses
#[derive(Debug, Clone)]
pub struct EnrolledCoursesStore {
    store: Store<Vec<EnrolledCourse>>,
}

impl Default for EnrolledCoursesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrolledCoursesStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(Vec::new()),
        }
    }

    pub fn courses(&self) -> Vec<EnrolledCourse> {
        self.store.get()
    }

    pub fn is_refreshing(&self) -> bool {
        self.store.is_loading()
    }

    pub fn set_courses(&self, courses: Vec<EnrolledCourse>) {
        self.store.set(courses);
    }

    /// Seed the store from server-rendered data.
    ///
    /// An empty list never overwrites the store, so a late or empty hydration
    /// cannot downgrade a populated list. Returns whether the store changed.
    pub fn initialize(&self, courses: Vec<EnrolledCourse>) -> bool {
        if courses.is_empty() {
            debug!("Skipping enrolled-course hydration with empty list");
            return false;
        }
        self.store.set(courses);
        true
    }

    /// Empty the store unconditionally. Used when the session ends or
    /// changes hands; hydration rules do not apply.
    pub fn reset(&self) {
        self.store.set(Vec::new());
    }

    /// Refetch the whole list; the previous list stays visible until the fetch completes
    pub async fn refresh(&self, service: &CourseService, session: &Session) -> ApiResult<()> {
        self.refresh_with(service.enrolled_courses(session)).await
    }

    pub async fn refresh_with<F>(&self, fetch: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ApiResult<Vec<EnrolledCourse>>>,
    {
        let result = self.store.refresh(fetch).await;
        if let Err(e) = &result {
            log_api_failure("refresh_enrolled_courses", e);
        }
        result
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<Vec<EnrolledCourse>>> {
        self.store.subscribe()
    }
}

/// Learner's active course
#[derive(Debug, Clone)]
pub struct ActiveCourseStore {
    store: Store<Option<ActiveCourse>>,
}

impl Default for ActiveCourseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveCourseStore {
    pub fn new() -> Self {
        Self {
            store: Store::new(None),
        }
    }

    pub fn active_course(&self) -> Option<ActiveCourse> {
        self.store.get()
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Replace the active course
    pub fn set_active_course(&self, course: Option<ActiveCourse>) {
        self.store.set(course);
    }

    /// Seed from server-rendered data; an absent course never clears a present one
    pub fn initialize(&self, course: Option<ActiveCourse>) -> bool {
        match course {
            Some(course) => {
                self.store.set(Some(course));
                true
            }
            None => false,
        }
    }

    /// Drop the active course unconditionally
    pub fn reset(&self) {
        self.store.set(None);
    }

    pub async fn refresh(&self, service: &CourseService, session: &Session) -> ApiResult<()> {
        let result = self.store.refresh(service.active_course(session)).await;
        if let Err(e) = &result {
            log_api_failure("refresh_active_course", e);
        }
        result
    }

    /// Select a new active course and store the API's answer
    pub async fn select(&self, service: &CourseService, session: &Session, course_id: &str) -> ApiResult<ActiveCourse> {
        let result = service.select_active_course(session, course_id).await;
        match &result {
            Ok(course) => self.store.set(Some(course.clone())),
            Err(e) => log_api_failure("select_active_course", e),
        }
        result
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<Option<ActiveCourse>>> {
        self.store.subscribe()
    }
}
