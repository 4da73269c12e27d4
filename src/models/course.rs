//! Course models

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use super::tag::Tag;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Full course as returned by `GET /courses/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub level: Option<CourseLevel>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Catalog entry returned by listing and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub level: Option<CourseLevel>,
}

/// A course the learner is registered in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

/// The single course the learner is currently focused on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveCourse {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectActiveCourseRequest {
    pub course_id: String,
}

/// Learner progress within one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    pub course_id: String,
    #[serde(default)]
    pub completed_lesson_ids: Vec<String>,
    #[serde(default)]
    pub percentage: f64,
}

impl CourseProgress {
    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed_lesson_ids.iter().any(|id| id == lesson_id)
    }
}
