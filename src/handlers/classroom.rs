//! Classroom handlers
//!
//! Lesson pages resolve a lesson inside the course roadmap, compute its
//! canonical URL and neighbours, and mark completion from learner progress.

use serde::Serialize;
use crate::models::{CourseProgress, Lesson, Roadmap, Session};
use crate::roadmap::{adjacent_lessons, find_lesson_by_slugs, find_lesson_context, LessonContext};
use crate::state::AppContext;
use crate::utils::errors::{ActionResult, ApiResult};
use crate::utils::logging::log_api_failure;

/// Link to another lesson
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonLink {
    pub id: String,
    pub title: String,
    pub url: String,
}

impl From<LessonContext<'_>> for LessonLink {
    fn from(ctx: LessonContext<'_>) -> Self {
        Self {
            id: ctx.lesson.id.clone(),
            title: ctx.lesson.title.clone(),
            url: ctx.url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPage {
    pub course_slug: String,
    pub module_id: String,
    pub module_title: String,
    pub group_id: String,
    pub group_title: String,
    pub lesson: Lesson,
    pub url: String,
    pub previous: Option<LessonLink>,
    pub next: Option<LessonLink>,
    pub completed: bool,
    pub progress_percentage: f64,
}

/// Lesson page by lesson id; `None` when the roadmap is unavailable or does
/// not contain the lesson
pub async fn handle_lesson_page(
    ctx: &AppContext,
    session: &Session,
    course_slug: &str,
    lesson_id: &str,
) -> Option<LessonPage> {
    let (roadmap, progress) = load_course_state(ctx, session, course_slug).await?;
    let lesson = find_lesson_context(&roadmap.modules, lesson_id)?;
    Some(build_lesson_page(course_slug, &roadmap, lesson, progress.as_ref()))
}

/// Lesson page by classroom URL segments
pub async fn handle_lesson_path(
    ctx: &AppContext,
    session: &Session,
    course_slug: &str,
    module_slug: &str,
    group_slug: &str,
    lesson_slug: &str,
) -> Option<LessonPage> {
    let (roadmap, progress) = load_course_state(ctx, session, course_slug).await?;
    let lesson = find_lesson_by_slugs(&roadmap.modules, module_slug, group_slug, lesson_slug)?;
    Some(build_lesson_page(course_slug, &roadmap, lesson, progress.as_ref()))
}

/// Mark a lesson complete
pub async fn handle_complete_lesson(
    ctx: &AppContext,
    session: &Session,
    course_slug: &str,
    module_id: &str,
    lesson_id: &str,
) -> ActionResult {
    let result = ctx
        .services
        .progress_service
        .complete_lesson(session, course_slug, module_id, lesson_id)
        .await;

    if let Err(e) = &result {
        log_api_failure("complete_lesson", e);
    }
    ActionResult::from_api(&result, "Lesson completed")
}

/// Roadmap and progress, fetched together. Missing progress degrades to
/// "nothing completed"; a missing roadmap yields `None`.
async fn load_course_state(
    ctx: &AppContext,
    session: &Session,
    course_slug: &str,
) -> Option<(Roadmap, Option<CourseProgress>)> {
    let progress_service = &ctx.services.progress_service;
    let (roadmap, progress): (ApiResult<Roadmap>, ApiResult<CourseProgress>) = tokio::join!(
        progress_service.roadmap(session, course_slug),
        progress_service.progress(session, course_slug)
    );

    let progress = progress
        .map_err(|e| log_api_failure("lesson_page_progress", &e))
        .ok();

    match roadmap {
        Ok(roadmap) => Some((roadmap, progress)),
        Err(e) => {
            log_api_failure("lesson_page_roadmap", &e);
            None
        }
    }
}

fn build_lesson_page(
    course_slug: &str,
    roadmap: &Roadmap,
    ctx: LessonContext<'_>,
    progress: Option<&CourseProgress>,
) -> LessonPage {
    let adjacent = adjacent_lessons(&roadmap.modules, &ctx.lesson.id);

    LessonPage {
        course_slug: course_slug.to_string(),
        module_id: ctx.module.id.clone(),
        module_title: ctx.module.title.clone(),
        group_id: ctx.group.id.clone(),
        group_title: ctx.group.title.clone(),
        lesson: ctx.lesson.clone(),
        url: ctx.url(),
        previous: adjacent.previous.map(LessonLink::from),
        next: adjacent.next.map(LessonLink::from),
        completed: progress.map_or(false, |p| p.is_completed(&ctx.lesson.id)),
        progress_percentage: progress.map_or(0.0, |p| p.percentage),
    }
}
