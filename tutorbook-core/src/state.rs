//! The application snapshot: every student, every lesson and the theme.
//!
//! Mutations here work in place on one `AppState`. The store applies them to a
//! copy and swaps the copy in once it has been persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lesson::{Lesson, LessonPatch, LessonStatus};
use crate::student::{Student, StudentPatch};

/// Root aggregate persisted as one snapshot.
///
/// Missing fields in a stored snapshot fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub theme: Theme,
}

/// Accent color preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Blue,
    Emerald,
    Amber,
    #[default]
    Violet,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Blue, Theme::Emerald, Theme::Amber, Theme::Violet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Emerald => "emerald",
            Theme::Amber => "amber",
            Theme::Violet => "violet",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown theme '{}'. Expected blue, emerald, amber or violet", s))
    }
}

impl AppState {
    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }

    /// The student a lesson refers to, if it still exists.
    pub fn student_of(&self, lesson: &Lesson) -> Option<&Student> {
        self.student(&lesson.student_id)
    }

    pub fn lessons_of<'a>(&'a self, student_id: &'a str) -> impl Iterator<Item = &'a Lesson> + 'a {
        self.lessons.iter().filter(move |l| l.student_id == student_id)
    }

    // =========================================================================
    // Students
    // =========================================================================

    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
    }

    /// Returns false (and changes nothing) when no student has this id.
    pub fn update_student(&mut self, id: &str, patch: &StudentPatch) -> bool {
        match self.students.iter_mut().find(|s| s.id == id) {
            Some(student) => {
                patch.apply(student);
                true
            }
            None => false,
        }
    }

    /// Remove a student together with every lesson that refers to it.
    ///
    /// Returns the number of lessons removed alongside.
    pub fn delete_student(&mut self, id: &str) -> usize {
        self.students.retain(|s| s.id != id);

        let before = self.lessons.len();
        self.lessons.retain(|l| l.student_id != id);
        before - self.lessons.len()
    }

    // =========================================================================
    // Lessons
    // =========================================================================

    pub fn add_lessons(&mut self, lessons: impl IntoIterator<Item = Lesson>) {
        self.lessons.extend(lessons);
    }

    pub fn update_lesson(&mut self, id: &str, patch: &LessonPatch) -> bool {
        match self.lessons.iter_mut().find(|l| l.id == id) {
            Some(lesson) => {
                patch.apply(lesson);
                true
            }
            None => false,
        }
    }

    pub fn delete_lesson(&mut self, id: &str) -> bool {
        let before = self.lessons.len();
        self.lessons.retain(|l| l.id != id);
        before != self.lessons.len()
    }

    /// Mark a planned lesson as completed. Returns false for any other status.
    pub fn complete_lesson(&mut self, id: &str) -> bool {
        self.resolve_planned(id, LessonStatus::Completed)
    }

    /// Mark a planned lesson as cancelled. Returns false for any other status.
    pub fn cancel_lesson(&mut self, id: &str) -> bool {
        self.resolve_planned(id, LessonStatus::Cancelled)
    }

    fn resolve_planned(&mut self, id: &str, status: LessonStatus) -> bool {
        match self.lessons.iter_mut().find(|l| l.id == id && l.is_planned()) {
            Some(lesson) => {
                lesson.status = status;
                true
            }
            None => false,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}
