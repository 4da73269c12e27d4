//! Course service implementation
//!
//! Catalog reads (by slug, by category, search) and the learner's enrolled
//! and active courses.

use reqwest::Method;
use tracing::debug;
use crate::middleware::auth::require_valid_session;
use crate::models::{ActiveCourse, Course, CourseSummary, EnrolledCourse, SelectActiveCourseRequest, Session};
use crate::utils::errors::ApiResult;
use super::api::ApiClient;

/// Course service for catalog and enrollment reads
#[derive(Debug, Clone)]
pub struct CourseService {
    api: ApiClient,
}

impl CourseService {
    /// Create a new CourseService instance
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Course by slug; `None` when the API answers 404
    pub async fn get_course(&self, slug: &str) -> ApiResult<Option<Course>> {
        let url = self.api.endpoint(&["courses", slug]);
        self.api.find_json(url, None).await
    }

    /// Catalog listing, optionally restricted to one category
    pub async fn list_courses(&self, category_slug: Option<&str>) -> ApiResult<Vec<CourseSummary>> {
        let mut url = self.api.endpoint(&["courses"]);
        if let Some(category) = category_slug {
            url.query_pairs_mut().append_pair("categorySlug", category);
        }
        self.api.get_json(url, None).await
    }

    /// Full-text course search. Blank queries return nothing without a request.
    pub async fn search_courses(&self, query: &str) -> ApiResult<Vec<CourseSummary>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Skipping course search for blank query");
            return Ok(Vec::new());
        }

        let mut url = self.api.endpoint(&["courses", "search"]);
        url.query_pairs_mut().append_pair("q", query);
        self.api.get_json(url, None).await
    }

    /// Courses the learner is registered in, in API order
    pub async fn enrolled_courses(&self, session: &Session) -> ApiResult<Vec<EnrolledCourse>> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["users", "me", "courses"]);
        self.api.get_json(url, Some(token)).await
    }

    /// The learner's active course; `None` when none is selected
    pub async fn active_course(&self, session: &Session) -> ApiResult<Option<ActiveCourse>> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["users", "me", "active-course"]);
        self.api.find_json(url, Some(token)).await
    }

    /// Make `course_id` the learner's active course
    pub async fn select_active_course(&self, session: &Session, course_id: &str) -> ApiResult<ActiveCourse> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["users", "me", "active-course"]);
        let body = SelectActiveCourseRequest {
            course_id: course_id.to_string(),
        };
        self.api.send_json(Method::PUT, url, &body, Some(token)).await
    }
}
