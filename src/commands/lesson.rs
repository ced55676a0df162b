use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use owo_colors::OwoColorize;
use tutorbook_core::config::TutorbookConfig;
use tutorbook_core::recurrence::expand_weekly;
use tutorbook_core::schedule::{LessonFilter, Schedule, StatusFilter};
use tutorbook_core::{LessonPatch, LessonStatus, Tutorbook};

use super::{confirm, non_empty, resolve_lesson, resolve_student};
use crate::render::{accent, format_date_label, render_lesson, short_id};

/// Fields for a new lesson. Anything left out comes from the config defaults.
pub struct NewLesson {
    pub student: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
    pub topic: Option<String>,
    pub notes: Option<String>,
    /// Repeat weekly through this date (inclusive)
    pub until: Option<NaiveDate>,
}

pub fn add(book: &mut Tutorbook, cfg: &TutorbookConfig, new: NewLesson, today: NaiveDate) -> Result<()> {
    let student = resolve_student(book.state(), &new.student)?;
    let student_name = student.name.clone();

    let mut template = cfg.lesson_template(&student.id)?;
    if let Some(time) = new.time {
        template.time = time;
    }
    if let Some(duration) = new.duration {
        template.duration = duration;
    }
    if let Some(price) = new.price {
        template.price = price;
    }
    template.topic = new.topic.and_then(non_empty);
    template.notes = new.notes.and_then(non_empty);

    let start = new.date.unwrap_or(today);

    let lessons = match new.until {
        Some(until) => {
            let series = expand_weekly(&template, start, until);
            if series.is_empty() {
                anyhow::bail!("The series ends ({}) before it starts ({})", until, start);
            }
            series
        }
        None => vec![template.instantiate(start, None)],
    };

    let count = lessons.len();
    let first = lessons[0].id.clone();
    book.add_lessons(lessons)?;

    let theme = book.state().theme;
    if count == 1 {
        let label = format!("  Scheduled: {} on {} at {}", student_name, start, template.time.format("%H:%M"));
        println!("{} {}", accent(theme, &label), short_id(&first).dimmed());
    } else {
        let label = format!(
            "  Scheduled {} weekly lessons with {} from {} at {}",
            count,
            student_name,
            start,
            template.time.format("%H:%M")
        );
        println!("{}", accent(theme, &label));
    }

    Ok(())
}

pub fn list(
    book: &Tutorbook,
    search: Option<String>,
    status: StatusFilter,
    history: bool,
    today: NaiveDate,
) -> Result<()> {
    let state = book.state();
    let filter = LessonFilter {
        search: search.unwrap_or_default(),
        status,
    };
    let schedule = Schedule::build(state, &filter, today);

    let groups = schedule.upcoming_by_date();
    if groups.is_empty() {
        println!("{}", "No upcoming lessons".dimmed());
    }

    let mut first = true;
    for (date, lessons) in &groups {
        if !first {
            println!();
        }
        first = false;

        let label = format_date_label(*date, today);
        println!("{}", accent(state.theme, &label).bold());
        for lesson in lessons {
            println!("{}", render_lesson(lesson, state.student_of(lesson), false));
        }
    }

    if history {
        println!();
        println!("{}", "History".bold());
        if schedule.past.is_empty() {
            println!("{}", "  No past lessons".dimmed());
        }
        for lesson in &schedule.past {
            println!("{}", render_lesson(lesson, state.student_of(lesson), true));
        }
    } else if !schedule.past.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} past lessons hidden (use --history)", schedule.past.len()).dimmed()
        );
    }

    Ok(())
}

/// Changes to an existing lesson. `None` keeps the current value;
/// an empty topic or notes string clears it.
pub struct LessonEdit {
    pub student: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
    pub topic: Option<String>,
    pub notes: Option<String>,
    pub status: Option<LessonStatus>,
}

pub fn edit(book: &mut Tutorbook, prefix: &str, edit: LessonEdit) -> Result<()> {
    let state = book.state();
    let id = resolve_lesson(state, prefix)?.id.clone();
    let student_id = match edit.student {
        Some(query) => Some(resolve_student(state, &query)?.id.clone()),
        None => None,
    };

    let patch = LessonPatch {
        student_id,
        date: edit.date,
        time: edit.time,
        duration: edit.duration,
        topic: edit.topic.map(non_empty),
        price: edit.price,
        status: edit.status,
        notes: edit.notes.map(non_empty),
    };

    if patch.is_empty() {
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }

    book.update_lesson(&id, &patch)?;

    let state = book.state();
    if let Some(lesson) = state.lesson(&id) {
        println!("  Updated:");
        println!("{}", render_lesson(lesson, state.student_of(lesson), true));
    }
    Ok(())
}

pub fn complete(book: &mut Tutorbook, prefix: &str) -> Result<()> {
    resolve_planned(book, prefix, LessonStatus::Completed)
}

pub fn cancel(book: &mut Tutorbook, prefix: &str) -> Result<()> {
    resolve_planned(book, prefix, LessonStatus::Cancelled)
}

fn resolve_planned(book: &mut Tutorbook, prefix: &str, to: LessonStatus) -> Result<()> {
    let lesson = resolve_lesson(book.state(), prefix)?;
    if !lesson.is_planned() {
        anyhow::bail!(
            "Lesson {} is already {}. Only planned lessons can be marked {}",
            short_id(&lesson.id),
            lesson.status,
            to
        );
    }
    let id = lesson.id.clone();

    let changed = match to {
        LessonStatus::Completed => book.complete_lesson(&id)?,
        LessonStatus::Cancelled => book.cancel_lesson(&id)?,
        LessonStatus::Planned => false,
    };

    if changed {
        let state = book.state();
        if let Some(lesson) = state.lesson(&id) {
            println!("{}", render_lesson(lesson, state.student_of(lesson), true));
        }
    }
    Ok(())
}

pub fn delete(book: &mut Tutorbook, prefix: &str, yes: bool) -> Result<()> {
    let state = book.state();
    let lesson = resolve_lesson(state, prefix)?;
    let id = lesson.id.clone();
    let who = state
        .student_of(lesson)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "unknown student".to_string());

    let prompt = format!(
        "Permanently delete the lesson with {} on {} at {}?",
        who,
        lesson.date,
        lesson.time.format("%H:%M")
    );
    if !confirm(&prompt, yes)? {
        return Ok(());
    }

    book.delete_lesson(&id)?;

    println!("{}", format!("  Deleted lesson {}", short_id(&id)).red());
    Ok(())
}
