//! Roadmap utilities
//!
//! Slug derivation, canonical lesson URLs and lesson-context lookups over a
//! course roadmap.

pub mod lookup;
pub mod slug;

pub use lookup::{adjacent_lessons, find_lesson_by_slugs, find_lesson_context, generate_lesson_url, AdjacentLessons, LessonContext};
pub use slug::{generate_slug, slug_or_derived};
