//! Test data and fixtures
//!
//! Canonical API payloads and sessions shared by the integration tests.

use chrono::{Duration, Utc};
use code_legends::models::Session;
use serde_json::{json, Value};

pub const TEST_ACCESS_TOKEN: &str = "access-token-1";
pub const TEST_REFRESH_TOKEN: &str = "refresh-token-1";
pub const TEST_USER_ID: &str = "user_1";
pub const COURSE_SLUG: &str = "rust-fundamentals";

/// A valid session whose token is far from expiry
pub fn test_session() -> Session {
    Session {
        user_id: TEST_USER_ID.to_string(),
        name: Some("Ada Lovelace".to_string()),
        email: Some("ada@example.com".to_string()),
        access_token: TEST_ACCESS_TOKEN.to_string(),
        refresh_token: TEST_REFRESH_TOKEN.to_string(),
        access_token_expires: Utc::now() + Duration::hours(1),
        error: None,
    }
}

/// A valid session whose access token has already expired
pub fn expired_session() -> Session {
    Session {
        access_token_expires: Utc::now() - Duration::minutes(5),
        ..test_session()
    }
}

/// A session whose last refresh failed
pub fn failed_session() -> Session {
    test_session().with_refresh_error()
}

pub fn enrolled_courses_json() -> Value {
    json!([
        {
            "id": "course_1",
            "slug": COURSE_SLUG,
            "title": "Rust Fundamentals",
            "progress": 40.0
        },
        {
            "id": "course_2",
            "slug": "async-rust",
            "title": "Async Rust",
            "thumbnail": "https://cdn.codelegends.dev/async.png"
        }
    ])
}

pub fn active_course_json() -> Value {
    json!({
        "id": "course_1",
        "slug": COURSE_SLUG,
        "title": "Rust Fundamentals"
    })
}

pub fn course_summaries_json() -> Value {
    json!([
        { "id": "course_1", "slug": COURSE_SLUG, "title": "Rust Fundamentals", "level": "BEGINNER" },
        { "id": "course_3", "slug": "rust-macros", "title": "Rust Macros", "level": "ADVANCED" }
    ])
}

/// Two modules; the first has one group with two lessons, the second one
/// group with one lesson. Only some nodes carry stored slugs.
pub fn roadmap_json() -> Value {
    json!({
        "courseId": "course_1",
        "modules": [
            {
                "id": "mod_1",
                "title": "Getting Started",
                "order": 1,
                "groups": [
                    {
                        "id": "grp_1",
                        "title": "Tooling & Setup",
                        "slug": "setup",
                        "order": 1,
                        "lessons": [
                            { "id": "les_1", "title": "Installing Rust", "order": 1, "durationMinutes": 5 },
                            { "id": "les_2", "title": "Cargo Basics", "slug": "cargo", "order": 2 }
                        ]
                    }
                ]
            },
            {
                "id": "mod_2",
                "title": "Ownership",
                "order": 2,
                "groups": [
                    {
                        "id": "grp_2",
                        "title": "Borrowing",
                        "order": 1,
                        "lessons": [
                            { "id": "les_3", "title": "References", "order": 1 }
                        ]
                    }
                ]
            }
        ]
    })
}

pub fn progress_json(completed: &[&str]) -> Value {
    json!({
        "courseId": "course_1",
        "completedLessonIds": completed,
        "percentage": (completed.len() as f64 / 3.0 * 100.0).round()
    })
}

pub fn request_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "userId": "user_2",
        "type": "COURSE_ACCESS",
        "status": status,
        "message": "Please grant access to Async Rust",
        "createdAt": "2025-01-10T09:00:00Z"
    })
}

pub fn tags_json() -> Value {
    json!([
        { "id": "tag_1", "name": "Systems", "slug": "systems" },
        { "id": "tag_2", "name": "Web", "slug": "web" }
    ])
}

pub fn certificate_json(id: &str, valid: bool) -> Value {
    json!({
        "id": id,
        "studentName": "Ada Lovelace",
        "courseTitle": "Rust Fundamentals",
        "issuedAt": "2025-02-01T12:00:00Z",
        "valid": valid
    })
}

pub fn token_pair_json(access_token: &str) -> Value {
    json!({
        "accessToken": access_token,
        "expiresIn": 900
    })
}
