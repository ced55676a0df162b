//! Read-only views over the lesson list.
//!
//! Nothing here mutates state: lessons are filtered, split into past and
//! upcoming around "today", sorted and grouped for display.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::lesson::{Lesson, LessonStatus};
use crate::state::AppState;
use crate::student::Student;

/// How many planned lessons the dashboard lists.
pub const NEXT_PLANNED_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LessonStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: LessonStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<LessonStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| format!("Unknown status filter '{}'. Expected all, planned, completed or cancelled", s))
    }
}

/// Free-text search plus status filter, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct LessonFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl LessonFilter {
    /// Case-insensitive match on the student's name or the lesson topic.
    /// A missing student never matches a non-empty term by name.
    pub fn matches(&self, lesson: &Lesson, student: Option<&Student>) -> bool {
        self.status.matches(lesson.status) && self.matches_search(lesson, student)
    }

    fn matches_search(&self, lesson: &Lesson, student: Option<&Student>) -> bool {
        let term = self.search.to_lowercase();
        let by_name = student.is_some_and(|s| s.name.to_lowercase().contains(&term));
        by_name || lesson.topic_str().to_lowercase().contains(&term)
    }
}

/// Filtered lessons split around today.
#[derive(Debug, Default)]
pub struct Schedule<'a> {
    /// Dated before today, most recent first
    pub past: Vec<&'a Lesson>,
    /// Dated today or later, soonest first
    pub upcoming: Vec<&'a Lesson>,
}

impl<'a> Schedule<'a> {
    /// Filter the state's lessons, then partition and sort them.
    pub fn build(state: &'a AppState, filter: &LessonFilter, today: NaiveDate) -> Self {
        let filtered = state
            .lessons
            .iter()
            .filter(|lesson| filter.matches(lesson, state.student_of(lesson)));

        partition(filtered, today)
    }

    /// Upcoming lessons keyed by date, ascending.
    pub fn upcoming_by_date(&self) -> BTreeMap<NaiveDate, Vec<&'a Lesson>> {
        group_by_date(&self.upcoming)
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty() && self.upcoming.is_empty()
    }
}

/// Split lessons into past (`date < today`) and upcoming (`date >= today`).
///
/// Only the date is compared. Sorting is stable, so lessons at the same
/// date and time keep their input order.
pub fn partition<'a>(lessons: impl IntoIterator<Item = &'a Lesson>, today: NaiveDate) -> Schedule<'a> {
    let (mut past, mut upcoming): (Vec<&Lesson>, Vec<&Lesson>) =
        lessons.into_iter().partition(|lesson| lesson.date < today);

    past.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));
    upcoming.sort_by_key(|lesson| lesson.starts_at());

    Schedule { past, upcoming }
}

/// Group already-sorted lessons by date, keeping their relative order.
pub fn group_by_date<'a>(lessons: &[&'a Lesson]) -> BTreeMap<NaiveDate, Vec<&'a Lesson>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&'a Lesson>> = BTreeMap::new();
    for &lesson in lessons {
        groups.entry(lesson.date).or_default().push(lesson);
    }
    groups
}

/// The next `limit` planned lessons by date and time, past-dated ones included.
pub fn next_planned(lessons: &[Lesson], limit: usize) -> Vec<&Lesson> {
    let mut planned: Vec<&Lesson> = lessons.iter().filter(|l| l.is_planned()).collect();
    planned.sort_by_key(|lesson| lesson.starts_at());
    planned.truncate(limit);
    planned
}

/// Students whose name or subject contains `term`, case-insensitively.
pub fn filter_students<'a>(students: &'a [Student], term: &str) -> Vec<&'a Student> {
    let term = term.to_lowercase();
    students
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&term) || s.subject.to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{parse_date, parse_time, LessonTemplate};
    use crate::student::EducationLevel;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn lesson(student_id: &str, day: &str, time: &str) -> Lesson {
        LessonTemplate::new(student_id, parse_time(time).unwrap(), 60, 40.0).instantiate(date(day), None)
    }

    fn with_topic(mut lesson: Lesson, topic: &str) -> Lesson {
        lesson.topic = Some(topic.to_string());
        lesson
    }

    fn state() -> (AppState, Student, Student) {
        let mut state = AppState::default();
        let kasia = Student::new("Kasia Nowak".into(), "Math".into(), String::new(), EducationLevel::HighSchool);
        let tomek = Student::new("Tomek".into(), "Physics".into(), String::new(), EducationLevel::University);
        state.add_student(kasia.clone());
        state.add_student(tomek.clone());
        (state, kasia, tomek)
    }

    fn ids(lessons: &[&Lesson]) -> Vec<String> {
        lessons.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn test_partition_is_total_and_date_only() {
        let today = date("2024-06-10");
        let lessons = vec![
            lesson("s", "2024-06-09", "23:59"),
            lesson("s", "2024-06-10", "00:00"),
            lesson("s", "2024-06-10", "23:00"),
            lesson("s", "2024-06-11", "08:00"),
        ];

        let schedule = partition(&lessons, today);

        assert_eq!(schedule.past.len(), 1);
        assert_eq!(schedule.upcoming.len(), 3);
        assert!(schedule.past.iter().all(|l| l.date < today));
        assert!(schedule.upcoming.iter().all(|l| l.date >= today));
    }

    #[test]
    fn test_sort_directions() {
        let lessons = vec![
            lesson("s", "2024-06-01", "10:00"),
            lesson("s", "2024-06-03", "09:00"),
            lesson("s", "2024-06-01", "18:00"),
            lesson("s", "2024-06-20", "12:00"),
            lesson("s", "2024-06-15", "15:00"),
            lesson("s", "2024-06-15", "08:00"),
        ];

        let schedule = partition(&lessons, date("2024-06-10"));

        let past: Vec<_> = schedule.past.iter().map(|l| l.starts_at()).collect();
        assert!(past.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(schedule.past[0].id, lessons[1].id);

        let upcoming: Vec<_> = schedule.upcoming.iter().map(|l| l.starts_at()).collect();
        assert!(upcoming.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(schedule.upcoming[0].id, lessons[5].id);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let lessons = vec![
            lesson("a", "2024-06-01", "10:00"),
            lesson("b", "2024-06-01", "10:00"),
            lesson("c", "2024-06-20", "10:00"),
            lesson("d", "2024-06-20", "10:00"),
        ];

        let schedule = partition(&lessons, date("2024-06-10"));

        assert_eq!(ids(&schedule.past), vec![lessons[0].id.clone(), lessons[1].id.clone()]);
        assert_eq!(ids(&schedule.upcoming), vec![lessons[2].id.clone(), lessons[3].id.clone()]);
    }

    #[test]
    fn test_upcoming_grouped_by_date_in_order() {
        let lessons = vec![
            lesson("s", "2024-06-12", "18:00"),
            lesson("s", "2024-06-11", "09:00"),
            lesson("s", "2024-06-12", "07:00"),
        ];

        let schedule = partition(&lessons, date("2024-06-10"));
        let groups = schedule.upcoming_by_date();

        let keys: Vec<_> = groups.keys().copied().collect();
        assert_eq!(keys, vec![date("2024-06-11"), date("2024-06-12")]);
        assert_eq!(ids(&groups[&date("2024-06-12")]), vec![lessons[2].id.clone(), lessons[0].id.clone()]);
    }

    #[test]
    fn test_search_matches_name_or_topic_case_insensitively() {
        let (mut state, kasia, tomek) = state();
        state.add_lessons([
            with_topic(lesson(&kasia.id, "2024-06-11", "10:00"), "Derivatives"),
            with_topic(lesson(&tomek.id, "2024-06-11", "11:00"), "Kinematics"),
            lesson(&tomek.id, "2024-06-12", "11:00"),
            lesson("ghost", "2024-06-12", "12:00"),
        ]);
        let today = date("2024-06-01");

        let by_name = LessonFilter { search: "KASIA".into(), ..Default::default() };
        assert_eq!(Schedule::build(&state, &by_name, today).upcoming.len(), 1);

        let by_topic = LessonFilter { search: "kinem".into(), ..Default::default() };
        let found = Schedule::build(&state, &by_topic, today);
        assert_eq!(ids(&found.upcoming), vec![state.lessons[1].id.clone()]);

        let everything = LessonFilter::default();
        assert_eq!(Schedule::build(&state, &everything, today).upcoming.len(), 4);

        let nothing = LessonFilter { search: "zzz".into(), ..Default::default() };
        assert!(Schedule::build(&state, &nothing, today).is_empty());
    }

    #[test]
    fn test_status_filter_is_anded_with_search() {
        let (mut state, kasia, _) = state();
        let mut done = lesson(&kasia.id, "2024-06-01", "10:00");
        done.status = LessonStatus::Completed;
        state.add_lessons([done, lesson(&kasia.id, "2024-06-20", "10:00")]);

        let filter = LessonFilter {
            search: "kasia".into(),
            status: "completed".parse().unwrap(),
        };
        let schedule = Schedule::build(&state, &filter, date("2024-06-10"));

        assert_eq!(schedule.past.len(), 1);
        assert!(schedule.upcoming.is_empty());
    }

    #[test]
    fn test_next_planned_limits_and_orders() {
        let mut lessons: Vec<Lesson> = (1..=8)
            .rev()
            .map(|d| lesson("s", &format!("2024-07-0{d}"), "10:00"))
            .collect();
        lessons[0].status = LessonStatus::Cancelled;

        let next = next_planned(&lessons, NEXT_PLANNED_LIMIT);

        assert_eq!(next.len(), 5);
        assert_eq!(next[0].date, date("2024-07-01"));
        assert!(next.iter().all(|l| l.is_planned()));
    }

    #[test]
    fn test_filter_students_by_name_or_subject() {
        let (state, kasia, tomek) = state();

        assert_eq!(filter_students(&state.students, "phys"), vec![&tomek]);
        assert_eq!(filter_students(&state.students, "nowak"), vec![&kasia]);
        assert_eq!(filter_students(&state.students, "").len(), 2);
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("Planned".parse::<StatusFilter>(), Ok(StatusFilter::Only(LessonStatus::Planned)));
        assert!("overdue".parse::<StatusFilter>().is_err());
    }
}
