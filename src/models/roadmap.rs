//! Course roadmap model
//!
//! A roadmap is the ordered tree of modules, groups and lessons of one course.
//! Stored slugs are optional; URL generation falls back to slugs derived from
//! titles (see [`crate::roadmap`]).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub course_id: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl Roadmap {
    /// Every lesson in roadmap order: modules, then groups, then lessons
    pub fn lessons(&self) -> impl Iterator<Item = (&Module, &Group, &Lesson)> {
        self.modules.iter().flat_map(|module| {
            module.groups.iter().flat_map(move |group| {
                group.lessons.iter().map(move |lesson| (module, group, lesson))
            })
        })
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons().count()
    }
}
