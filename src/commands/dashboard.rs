use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use tutorbook_core::schedule::{next_planned, NEXT_PLANNED_LIMIT};
use tutorbook_core::stats::Summary;
use tutorbook_core::Tutorbook;

use crate::render::{accent, format_amount, render_weekly_chart, short_id};

pub fn run(book: &Tutorbook, today: NaiveDate, json: bool) -> Result<()> {
    let state = book.state();
    let summary = Summary::compute(state, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let stats = [
        ("Students", summary.students.to_string()),
        ("Total earnings", format_amount(summary.total_earnings)),
        ("Earnings (7 days)", format_amount(summary.weekly.total())),
        ("Planned", summary.planned.to_string()),
    ];
    for (label, value) in stats {
        println!("  {:<18} {}", label.dimmed(), accent(state.theme, &value).bold());
    }

    println!();
    println!("{}", "Last 7 days".bold());
    for line in render_weekly_chart(&summary.weekly, state.theme) {
        println!("{}", line);
    }

    println!();
    println!("{}", "Upcoming lessons".bold());
    let next = next_planned(&state.lessons, NEXT_PLANNED_LIMIT);
    if next.is_empty() {
        println!("{}", "  No planned lessons".dimmed());
    }
    for lesson in next {
        let name = state.student_of(lesson).map(|s| s.name.as_str()).unwrap_or("?");
        println!(
            "  {} {} {} {} {}",
            short_id(&lesson.id).dimmed(),
            lesson.date.format("%d.%m"),
            lesson.time.format("%H:%M"),
            name,
            lesson.topic.as_deref().unwrap_or("No topic").dimmed()
        );
    }

    Ok(())
}
