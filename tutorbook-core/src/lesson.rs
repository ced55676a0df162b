//! Lesson sessions and their status.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{TutorError, TutorResult};

/// One scheduled session with a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    /// Refers to a student by id. The student may no longer exist.
    pub student_id: String,
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    /// Length in minutes
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub status: LessonStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Shared by every lesson generated from the same weekly series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Lesson {
    /// When the lesson starts, used for chronological ordering.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn is_planned(&self) -> bool {
        self.status == LessonStatus::Planned
    }

    pub fn is_completed(&self) -> bool {
        self.status == LessonStatus::Completed
    }

    /// Topic for display and search; an absent topic reads as empty.
    pub fn topic_str(&self) -> &str {
        self.topic.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    #[default]
    Planned,
    Completed,
    Cancelled,
}

impl LessonStatus {
    pub const ALL: [LessonStatus; 3] = [
        LessonStatus::Planned,
        LessonStatus::Completed,
        LessonStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Planned => "planned",
            LessonStatus::Completed => "completed",
            LessonStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LessonStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown status '{}'. Expected planned, completed or cancelled", s)
            })
    }
}

/// Everything a lesson needs except its id, date and group.
///
/// Used both for single lessons and as the template of a weekly series.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonTemplate {
    pub student_id: String,
    pub time: NaiveTime,
    pub duration: u32,
    pub topic: Option<String>,
    pub price: f64,
    pub status: LessonStatus,
    pub notes: Option<String>,
}

impl LessonTemplate {
    pub fn new(student_id: impl Into<String>, time: NaiveTime, duration: u32, price: f64) -> Self {
        LessonTemplate {
            student_id: student_id.into(),
            time,
            duration,
            topic: None,
            price,
            status: LessonStatus::Planned,
            notes: None,
        }
    }

    /// Build a concrete lesson on `date` with a fresh id.
    pub fn instantiate(&self, date: NaiveDate, group_id: Option<String>) -> Lesson {
        Lesson {
            id: crate::new_id(),
            student_id: self.student_id.clone(),
            date,
            time: self.time,
            duration: self.duration,
            topic: self.topic.clone(),
            price: self.price,
            status: self.status,
            notes: self.notes.clone(),
            group_id,
        }
    }
}

/// Partial update for a [`Lesson`]. Present fields overwrite, absent fields are kept.
///
/// `topic` and `notes` are doubly optional so an edit can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonPatch {
    pub student_id: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: Option<u32>,
    pub topic: Option<Option<String>>,
    pub price: Option<f64>,
    pub status: Option<LessonStatus>,
    pub notes: Option<Option<String>>,
}

impl LessonPatch {
    pub fn status(status: LessonStatus) -> Self {
        LessonPatch {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == LessonPatch::default()
    }

    pub fn apply(&self, lesson: &mut Lesson) {
        if let Some(student_id) = &self.student_id {
            lesson.student_id = student_id.clone();
        }
        if let Some(date) = self.date {
            lesson.date = date;
        }
        if let Some(time) = self.time {
            lesson.time = time;
        }
        if let Some(duration) = self.duration {
            lesson.duration = duration;
        }
        if let Some(topic) = &self.topic {
            lesson.topic = topic.clone();
        }
        if let Some(price) = self.price {
            lesson.price = price;
        }
        if let Some(status) = self.status {
            lesson.status = status;
        }
        if let Some(notes) = &self.notes {
            lesson.notes = notes.clone();
        }
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> TutorResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        TutorError::InvalidInput(format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
    })
}

/// Parse an `HH:MM` (or `HH:MM:SS`) clock time.
pub fn parse_time(s: &str) -> TutorResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| TutorError::InvalidInput(format!("Invalid time format '{}'. Expected HH:MM", s)))
}

/// Serde adapter storing times as `HH:MM`.
mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format("%H:%M"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
