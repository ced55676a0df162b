//! TUI rendering for tutorbook types.
//!
//! Extension traits that add colored terminal output to tutorbook-core types
//! using owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tutorbook_core::stats::WeeklyEarnings;
use tutorbook_core::{Lesson, LessonStatus, Student, Theme};

/// Label shown when a lesson's student no longer exists.
const UNKNOWN_STUDENT: &str = "Unknown student";

/// Width of the longest bar in the weekly earnings chart.
const CHART_WIDTH: usize = 30;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for LessonStatus {
    fn render(&self) -> String {
        match self {
            LessonStatus::Planned => "PLAN".yellow().to_string(),
            LessonStatus::Completed => " OK ".green().to_string(),
            LessonStatus::Cancelled => "  X ".red().to_string(),
        }
    }
}

impl Render for Student {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            short_id(&self.id).dimmed(),
            self.name.bold(),
            self.subject,
            format!("({})", self.level).dimmed()
        )
    }
}

/// Paint `text` in the accent color of the chosen theme.
pub fn accent(theme: Theme, text: &str) -> String {
    match theme {
        Theme::Blue => text.blue().to_string(),
        Theme::Emerald => text.green().to_string(),
        Theme::Amber => text.yellow().to_string(),
        Theme::Violet => text.magenta().to_string(),
    }
}

/// First 8 characters of an id, enough to address it on the command line.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Whole amounts print without decimals, anything else with two.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.0}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

/// One line for a lesson. `show_date` adds the date, used for past lessons
/// that are not grouped under a date heading.
pub fn render_lesson(lesson: &Lesson, student: Option<&Student>, show_date: bool) -> String {
    let name = match student {
        Some(s) => s.name.bold().to_string(),
        None => UNKNOWN_STUDENT.italic().dimmed().to_string(),
    };

    let topic = match &lesson.topic {
        Some(t) => t.clone(),
        None => "No topic".dimmed().to_string(),
    };

    let date = if show_date {
        format!("{} ", lesson.date.format("%d.%m.%Y"))
    } else {
        String::new()
    };

    let series = if lesson.group_id.is_some() { " ↻" } else { "" };

    format!(
        "  {} {}{} {} {}{} {} {} {}",
        short_id(&lesson.id).dimmed(),
        date,
        lesson.time.format("%H:%M"),
        lesson.status.render(),
        name,
        series.dimmed(),
        topic,
        format!("{}min", lesson.duration).dimmed(),
        format_amount(lesson.price)
    )
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Horizontal bar chart of the last seven days of earnings.
pub fn render_weekly_chart(weekly: &WeeklyEarnings, theme: Theme) -> Vec<String> {
    let max = weekly.days.iter().map(|d| d.amount).fold(0.0_f64, f64::max);

    weekly
        .days
        .iter()
        .map(|day| {
            let width = if max > 0.0 {
                ((day.amount / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!(
                "  {} {} {}",
                day.date.format("%a %d.%m").dimmed(),
                accent(theme, &"█".repeat(width)),
                format_amount(day.amount)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(60.0), "60");
        assert_eq!(format_amount(42.5), "42.50");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_format_date_label() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 24).unwrap();
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(today.succ_opt().unwrap(), today), "Tomorrow");
        assert_eq!(
            format_date_label(NaiveDate::from_ymd_opt(2025, 2, 26).unwrap(), today),
            "Wed Feb 26"
        );
    }
}
