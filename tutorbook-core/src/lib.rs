//! Core types for tutorbook.
//!
//! This crate holds everything the `tutorbook` CLI works with:
//! - `student` and `lesson` records plus their patch types
//! - `recurrence` for expanding a weekly lesson series
//! - `schedule` and `stats` for pure views over the lesson list
//! - `state` and `store` for the snapshot and its persistence

pub mod config;
pub mod error;
pub mod lesson;
pub mod recurrence;
pub mod schedule;
pub mod state;
pub mod stats;
pub mod store;
pub mod student;

pub use error::{TutorError, TutorResult};
pub use lesson::{Lesson, LessonPatch, LessonStatus, LessonTemplate};
pub use state::{AppState, Theme};
pub use store::Tutorbook;
pub use student::{EducationLevel, Student, StudentPatch};

/// Generate a fresh opaque id for a student, lesson or recurrence group.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
