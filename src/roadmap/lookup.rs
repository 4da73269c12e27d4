//! Lesson URL generation and roadmap lookups
//!
//! All lookups are linear scans in roadmap order (modules, then groups, then
//! lessons) and return the first exact match.

use crate::models::{Group, Lesson, Module};
use super::slug::slug_or_derived;

/// A lesson together with the module and group that contain it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LessonContext<'a> {
    pub module: &'a Module,
    pub group: &'a Group,
    pub lesson: &'a Lesson,
}

impl<'a> LessonContext<'a> {
    /// Canonical classroom path of this lesson
    pub fn url(&self) -> String {
        generate_lesson_url(self.module, self.group, self.lesson)
    }
}

/// Lessons immediately before and after a given lesson in roadmap order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjacentLessons<'a> {
    pub previous: Option<LessonContext<'a>>,
    pub next: Option<LessonContext<'a>>,
}

pub fn module_slug(module: &Module) -> String {
    slug_or_derived(module.slug.as_deref(), &module.title)
}

pub fn group_slug(group: &Group) -> String {
    slug_or_derived(group.slug.as_deref(), &group.title)
}

pub fn lesson_slug(lesson: &Lesson) -> String {
    slug_or_derived(lesson.slug.as_deref(), &lesson.title)
}

/// Build `/classroom/{module}/group/{group}/lesson/{lesson}`.
///
/// Each segment uses the stored slug verbatim when present and the slug
/// derived from the title otherwise.
pub fn generate_lesson_url(module: &Module, group: &Group, lesson: &Lesson) -> String {
    format!(
        "/classroom/{}/group/{}/lesson/{}",
        module_slug(module),
        group_slug(group),
        lesson_slug(lesson)
    )
}

fn contexts(modules: &[Module]) -> impl Iterator<Item = LessonContext<'_>> {
    modules.iter().flat_map(|module| {
        module.groups.iter().flat_map(move |group| {
            group
                .lessons
                .iter()
                .map(move |lesson| LessonContext { module, group, lesson })
        })
    })
}

/// Locate the module and group containing `lesson_id`
pub fn find_lesson_context<'a>(modules: &'a [Module], lesson_id: &str) -> Option<LessonContext<'a>> {
    contexts(modules).find(|ctx| ctx.lesson.id == lesson_id)
}

/// Resolve classroom URL segments back to a lesson
pub fn find_lesson_by_slugs<'a>(
    modules: &'a [Module],
    module: &str,
    group: &str,
    lesson: &str,
) -> Option<LessonContext<'a>> {
    modules
        .iter()
        .filter(|m| module_slug(m) == module)
        .flat_map(|m| {
            m.groups
                .iter()
                .filter(|g| group_slug(g) == group)
                .flat_map(move |g| {
                    g.lessons
                        .iter()
                        .map(move |l| LessonContext { module: m, group: g, lesson: l })
                })
        })
        .find(|ctx| lesson_slug(ctx.lesson) == lesson)
}

/// Previous and next lessons around `lesson_id`, crossing group and module
/// boundaries. Both are `None` when the lesson is unknown.
pub fn adjacent_lessons<'a>(modules: &'a [Module], lesson_id: &str) -> AdjacentLessons<'a> {
    let mut previous = None;
    let mut iter = contexts(modules);

    while let Some(ctx) = iter.next() {
        if ctx.lesson.id == lesson_id {
            return AdjacentLessons {
                previous,
                next: iter.next(),
            };
        }
        previous = Some(ctx);
    }

    AdjacentLessons::default()
}
