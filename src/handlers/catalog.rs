//! Course catalog handlers

use tracing::debug;
use crate::models::{ActiveCourse, Course, CourseSummary, Session};
use crate::state::AppContext;
use crate::utils::errors::{ActionResult, ApiResult};
use crate::utils::logging::log_api_failure;

/// Course landing page; `None` renders the not-found page
pub async fn handle_course_page(ctx: &AppContext, slug: &str) -> Option<Course> {
    match ctx.services.course_service.get_course(slug).await {
        Ok(course) => course,
        Err(e) => {
            log_api_failure("course_page", &e);
            None
        }
    }
}

/// Catalog listing, optionally narrowed to one category
pub async fn handle_category_listing(ctx: &AppContext, category_slug: Option<&str>) -> Vec<CourseSummary> {
    ctx.services
        .course_service
        .list_courses(category_slug)
        .await
        .unwrap_or_else(|e| {
            log_api_failure("category_listing", &e);
            Vec::new()
        })
}

pub async fn handle_search(ctx: &AppContext, query: &str) -> Vec<CourseSummary> {
    let results = ctx
        .services
        .course_service
        .search_courses(query)
        .await
        .unwrap_or_else(|e| {
            log_api_failure("course_search", &e);
            Vec::new()
        });

    debug!(query = query, results = results.len(), "Course search handled");
    results
}

/// "Continue with this course" action. On success the active-course store
/// holds the new selection.
pub async fn handle_select_active_course(ctx: &AppContext, session: &Session, course_id: &str) -> ActionResult {
    let result: ApiResult<ActiveCourse> = ctx
        .active_course
        .select(&ctx.services.course_service, session, course_id)
        .await;

    ActionResult::from_api(&result, "Active course updated")
}
