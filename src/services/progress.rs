//! Roadmap and progress service implementation
//!
//! Roadmap and progress reads go through the tagged [`ResponseCache`];
//! completing a lesson busts the tags of the affected course and module.

use reqwest::Method;
use tracing::info;
use crate::middleware::auth::require_valid_session;
use crate::models::{CourseProgress, Roadmap, Session};
use crate::utils::errors::ApiResult;
use super::api::ApiClient;
use super::cache::{tags, ResponseCache};

/// Roadmap and progress service
#[derive(Debug, Clone)]
pub struct ProgressService {
    api: ApiClient,
    cache: ResponseCache,
}

impl ProgressService {
    /// Create a new ProgressService instance
    pub fn new(api: ApiClient, cache: ResponseCache) -> Self {
        Self { api, cache }
    }

    /// Course roadmap for the signed-in learner
    pub async fn roadmap(&self, session: &Session, course_slug: &str) -> ApiResult<Roadmap> {
        let token = require_valid_session(session)?;
        let key = format!("roadmap:{}:{}", course_slug, session.user_id);

        if let Some(cached) = self.cache.get::<Roadmap>(&key).await {
            return Ok(cached);
        }

        let url = self.api.endpoint(&["courses", course_slug, "roadmap"]);
        let roadmap: Roadmap = self.api.get_json(url, Some(token)).await?;

        let mut roadmap_tags = vec![tags::roadmap(course_slug)];
        roadmap_tags.extend(roadmap.modules.iter().map(|m| tags::module(&m.id)));
        self.cache.put(&key, &roadmap, &roadmap_tags).await;

        Ok(roadmap)
    }

    /// Learner progress in one course
    pub async fn progress(&self, session: &Session, course_slug: &str) -> ApiResult<CourseProgress> {
        let token = require_valid_session(session)?;
        let key = format!("progress:{}:{}", course_slug, session.user_id);
        let url = self.api.endpoint(&["courses", course_slug, "progress"]);

        self.cache
            .get_or_fetch(&key, &[tags::progress(course_slug)], || self.api.get_json(url, Some(token)))
            .await
    }

    /// Mark a lesson complete and invalidate cached progress for its course and module
    pub async fn complete_lesson(
        &self,
        session: &Session,
        course_slug: &str,
        module_id: &str,
        lesson_id: &str,
    ) -> ApiResult<()> {
        let token = require_valid_session(session)?;
        let url = self.api.endpoint(&["progress", "lessons", lesson_id, "complete"]);
        self.api.send_empty(Method::POST, url, Some(token)).await?;

        self.cache.invalidate_tag(&tags::progress(course_slug)).await;
        self.cache.invalidate_tag(&tags::module(module_id)).await;

        info!(user_id = %session.user_id, course = course_slug, lesson_id = lesson_id, "Lesson completed");
        Ok(())
    }

    /// Drop every cached roadmap and progress entry of a course
    pub async fn invalidate_course(&self, course_slug: &str) -> u64 {
        self.cache.invalidate_tag(&tags::roadmap(course_slug)).await
            + self.cache.invalidate_tag(&tags::progress(course_slug)).await
    }
}
