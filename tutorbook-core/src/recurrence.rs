//! Weekly lesson series.
//!
//! Expands one lesson template into dated instances spaced a week apart.
//! The resulting lessons are independent once created; only the shared
//! `group_id` links them.

use chrono::{Duration, NaiveDate};

use crate::lesson::{Lesson, LessonTemplate};

/// Days between two instances of a series.
pub const SERIES_STEP_DAYS: i64 = 7;

/// Expand `template` into one lesson per week from `start` through `end` (inclusive).
///
/// Every instance gets a fresh id and all of them share one fresh group id.
/// Returns an empty series when `end` is before `start`. The length is not capped.
pub fn expand_weekly(template: &LessonTemplate, start: NaiveDate, end: NaiveDate) -> Vec<Lesson> {
    let group_id = crate::new_id();

    series_dates(start, end)
        .map(|date| template.instantiate(date, Some(group_id.clone())))
        .collect()
}

/// Dates of a weekly series: `start + 7k` for every k that stays on or before `end`.
pub fn series_dates(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(start), |date| {
        date.checked_add_signed(Duration::days(SERIES_STEP_DAYS))
    })
    .take_while(move |date| *date <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::{parse_date, parse_time, LessonStatus};
    use std::collections::HashSet;

    fn template() -> LessonTemplate {
        let mut template = LessonTemplate::new("s1", parse_time("17:30").unwrap(), 90, 120.0);
        template.topic = Some("Essay writing".to_string());
        template.notes = Some("bring past papers".to_string());
        template
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_three_week_span_yields_four_instances() {
        let series = expand_weekly(&template(), date("2024-01-01"), date("2024-01-22"));

        let dates: Vec<String> = series.iter().map(|l| l.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-08", "2024-01-15", "2024-01-22"]);

        let groups: HashSet<_> = series.iter().map(|l| l.group_id.clone()).collect();
        assert_eq!(groups.len(), 1);
        assert!(series[0].group_id.is_some());
    }

    #[test]
    fn test_end_before_start_is_empty() {
        let series = expand_weekly(&template(), date("2024-02-10"), date("2024-02-09"));
        assert!(series.is_empty());
    }

    #[test]
    fn test_same_day_yields_one_instance() {
        let series = expand_weekly(&template(), date("2024-02-10"), date("2024-02-10"));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].date, date("2024-02-10"));
    }

    #[test]
    fn test_count_matches_week_arithmetic() {
        let start = date("2023-11-20");
        for span in 0..60 {
            let end = start + Duration::days(span);
            let series = expand_weekly(&template(), start, end);

            assert_eq!(series.len() as i64, span / SERIES_STEP_DAYS + 1, "span {span}");
            for (k, lesson) in series.iter().enumerate() {
                assert_eq!(lesson.date, start + Duration::days(SERIES_STEP_DAYS * k as i64));
            }
        }
    }

    #[test]
    fn test_instances_copy_template_fields_with_unique_ids() {
        let series = expand_weekly(&template(), date("2024-03-01"), date("2024-04-30"));

        let ids: HashSet<_> = series.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), series.len());

        for lesson in &series {
            assert_eq!(lesson.student_id, "s1");
            assert_eq!(lesson.duration, 90);
            assert_eq!(lesson.price, 120.0);
            assert_eq!(lesson.status, LessonStatus::Planned);
            assert_eq!(lesson.topic.as_deref(), Some("Essay writing"));
            assert_eq!(lesson.notes.as_deref(), Some("bring past papers"));
        }
    }

    #[test]
    fn test_each_call_gets_its_own_group() {
        let a = expand_weekly(&template(), date("2024-01-01"), date("2024-01-15"));
        let b = expand_weekly(&template(), date("2024-01-01"), date("2024-01-15"));
        assert_ne!(a[0].group_id, b[0].group_id);
    }
}
