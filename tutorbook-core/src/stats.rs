//! Earnings and workload aggregates for the dashboard.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::lesson::Lesson;
use crate::state::AppState;

/// Length of the trailing earnings window, today included.
pub const WEEK_DAYS: i64 = 7;

/// Completed-lesson earnings on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEarnings {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Per-day earnings for the 7 days ending today, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyEarnings {
    pub days: Vec<DailyEarnings>,
}

impl WeeklyEarnings {
    pub fn total(&self) -> f64 {
        self.days.iter().map(|d| d.amount).sum()
    }
}

/// Sum of prices over every completed lesson, regardless of date.
pub fn total_earnings(lessons: &[Lesson]) -> f64 {
    lessons.iter().filter(|l| l.is_completed()).map(|l| l.price).sum()
}

/// Sum of prices over completed lessons dated `date`.
pub fn daily_earnings(lessons: &[Lesson], date: NaiveDate) -> f64 {
    lessons
        .iter()
        .filter(|l| l.is_completed() && l.date == date)
        .map(|l| l.price)
        .sum()
}

/// Sum of prices over completed lessons dated within `[from, to]`.
pub fn earnings_between(lessons: &[Lesson], from: NaiveDate, to: NaiveDate) -> f64 {
    lessons
        .iter()
        .filter(|l| l.is_completed() && l.date >= from && l.date <= to)
        .map(|l| l.price)
        .sum()
}

pub fn weekly_earnings(lessons: &[Lesson], today: NaiveDate) -> WeeklyEarnings {
    let days = (0..WEEK_DAYS)
        .rev()
        .map(|back| today - Duration::days(back))
        .map(|date| DailyEarnings {
            date,
            amount: daily_earnings(lessons, date),
        })
        .collect();

    WeeklyEarnings { days }
}

/// Number of planned lessons, including ones dated in the past.
pub fn planned_count(lessons: &[Lesson]) -> usize {
    lessons.iter().filter(|l| l.is_planned()).count()
}

/// Everything the dashboard shows as headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub students: usize,
    pub total_earnings: f64,
    pub weekly: WeeklyEarnings,
    pub planned: usize,
}

impl Summary {
    pub fn compute(state: &AppState, today: NaiveDate) -> Self {
        Summary {
            students: state.students.len(),
            total_earnings: total_earnings(&state.lessons),
            weekly: weekly_earnings(&state.lessons, today),
            planned: planned_count(&state.lessons),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{parse_date, parse_time, LessonStatus, LessonTemplate};
    use crate::student::{EducationLevel, Student};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn lesson(day: &str, price: f64, status: LessonStatus) -> Lesson {
        let mut template = LessonTemplate::new("s", parse_time("16:00").unwrap(), 60, price);
        template.status = status;
        template.instantiate(date(day), None)
    }

    #[test]
    fn test_weekly_window_covers_seven_days_ending_today() {
        let today = date("2024-03-10");
        let weekly = weekly_earnings(&[], today);

        assert_eq!(weekly.days.len(), 7);
        assert_eq!(weekly.days[0].date, date("2024-03-04"));
        assert_eq!(weekly.days[6].date, today);
        assert_eq!(weekly.total(), 0.0);
    }

    #[test]
    fn test_weekly_total_agrees_with_direct_sum() {
        let today = date("2024-03-10");
        let lessons = vec![
            lesson("2024-03-03", 500.0, LessonStatus::Completed),
            lesson("2024-03-04", 40.0, LessonStatus::Completed),
            lesson("2024-03-04", 60.5, LessonStatus::Completed),
            lesson("2024-03-07", 80.0, LessonStatus::Cancelled),
            lesson("2024-03-08", 70.0, LessonStatus::Planned),
            lesson("2024-03-10", 55.25, LessonStatus::Completed),
            lesson("2024-03-11", 90.0, LessonStatus::Completed),
        ];

        let weekly = weekly_earnings(&lessons, today);
        let direct = earnings_between(&lessons, today - Duration::days(WEEK_DAYS - 1), today);

        assert_eq!(weekly.total(), 155.75);
        assert_eq!(weekly.total(), direct);
        assert_eq!(weekly.days[0].amount, 100.5);
    }

    #[test]
    fn test_total_earnings_ignores_dates_and_other_statuses() {
        let lessons = vec![
            lesson("2019-01-01", 30.0, LessonStatus::Completed),
            lesson("2030-01-01", 20.0, LessonStatus::Completed),
            lesson("2024-01-01", 99.0, LessonStatus::Cancelled),
            lesson("2024-01-01", 99.0, LessonStatus::Planned),
        ];
        assert_eq!(total_earnings(&lessons), 50.0);
    }

    #[test]
    fn test_planned_count_includes_overdue() {
        let lessons = vec![
            lesson("2001-01-01", 10.0, LessonStatus::Planned),
            lesson("2099-01-01", 10.0, LessonStatus::Planned),
            lesson("2024-01-01", 10.0, LessonStatus::Completed),
        ];
        assert_eq!(planned_count(&lessons), 2);
    }

    #[test]
    fn test_completing_a_lesson_moves_it_into_earnings() {
        let today = date("2024-09-02");
        let mut state = AppState::default();
        let student = Student::new("A".into(), "Math".into(), String::new(), EducationLevel::HighSchool);
        let l1 = LessonTemplate::new(&student.id, parse_time("16:00").unwrap(), 60, 50.0)
            .instantiate(today, None);
        let id = l1.id.clone();
        state.add_student(student);
        state.add_lessons([l1]);

        let before = Summary::compute(&state, today);
        assert_eq!(before.planned, 1);
        assert_eq!(before.total_earnings, 0.0);

        assert!(state.complete_lesson(&id));
        let after = Summary::compute(&state, today);
        assert_eq!(after.total_earnings, 50.0);
        assert_eq!(after.weekly.total(), 50.0);
        assert_eq!(after.planned, 0);
        assert_eq!(after.students, 1);
    }
}
