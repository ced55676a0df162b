pub mod dashboard;
pub mod lesson;
pub mod student;
pub mod theme;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use dialoguer::Confirm;
use tutorbook_core::{AppState, Lesson, Student};

/// The tutor's calendar date right now.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Ask before a destructive change unless `--yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .context("Could not read confirmation")?;

    Ok(confirmed)
}

/// Find a student by exact name (case-insensitive) or by a unique id prefix.
pub fn resolve_student<'a>(state: &'a AppState, query: &str) -> Result<&'a Student> {
    let wanted = query.to_lowercase();
    let by_name: Vec<&Student> = state
        .students
        .iter()
        .filter(|s| s.name.to_lowercase() == wanted)
        .collect();

    if let [student] = by_name.as_slice() {
        return Ok(*student);
    }

    let by_id: Vec<&Student> = state.students.iter().filter(|s| s.id.starts_with(query)).collect();

    match by_id.as_slice() {
        [student] => Ok(*student),
        [] if by_name.is_empty() => anyhow::bail!("No student matches '{}'", query),
        _ => anyhow::bail!(
            "'{}' matches more than one student. Use a longer id prefix (see `tutorbook student list`)",
            query
        ),
    }
}

/// Find a lesson by a unique id prefix.
pub fn resolve_lesson<'a>(state: &'a AppState, prefix: &str) -> Result<&'a Lesson> {
    let matches: Vec<&Lesson> = state.lessons.iter().filter(|l| l.id.starts_with(prefix)).collect();

    match matches.as_slice() {
        [lesson] => Ok(*lesson),
        [] => anyhow::bail!("No lesson matches '{}'", prefix),
        _ => anyhow::bail!("'{}' matches {} lessons. Use a longer id prefix", prefix, matches.len()),
    }
}

/// Parse a lesson length: bare minutes ("45") or a humantime duration ("1h30m").
pub fn parse_minutes(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let minutes = match input.parse::<u32>() {
        Ok(m) => m,
        Err(_) => {
            let dur = humantime::parse_duration(input).map_err(|e| e.to_string())?;
            u32::try_from(dur.as_secs() / 60).map_err(|_| "Duration too large".to_string())?
        }
    };

    if minutes == 0 {
        return Err("Duration must be at least one minute".to_string());
    }
    Ok(minutes)
}

/// Parse a price, rejecting negative and non-finite amounts.
pub fn parse_price(input: &str) -> Result<f64, String> {
    let price: f64 = input
        .trim()
        .parse()
        .map_err(|_| format!("Invalid price '{}'", input))?;

    if !price.is_finite() || price < 0.0 {
        return Err(format!("Price must be a non-negative amount, got '{}'", input));
    }
    Ok(price)
}

/// Empty text on the command line means "no value".
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
