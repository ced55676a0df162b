use anyhow::Result;
use owo_colors::OwoColorize;
use tutorbook_core::schedule::filter_students;
use tutorbook_core::{EducationLevel, Student, StudentPatch, Tutorbook};

use super::{confirm, non_empty, resolve_student};
use crate::render::{accent, short_id, Render};

pub fn add(
    book: &mut Tutorbook,
    name: String,
    subject: String,
    contact: Option<String>,
    level: EducationLevel,
) -> Result<()> {
    let student = Student::new(name, subject, contact.unwrap_or_default(), level);
    let label = format!("  Added: {}", student.name);
    let id = student.id.clone();

    book.add_student(student)?;

    println!("{} {}", accent(book.state().theme, &label), short_id(&id).dimmed());
    Ok(())
}

pub fn list(book: &Tutorbook, search: Option<String>) -> Result<()> {
    let state = book.state();
    let students = filter_students(&state.students, search.as_deref().unwrap_or(""));

    if students.is_empty() {
        println!("{}", "No students found".dimmed());
        return Ok(());
    }

    for student in students {
        let lessons = state.lessons_of(&student.id).count();
        println!("{}", student.render());
        if !student.contact.is_empty() {
            println!("         {}", student.contact.dimmed());
        }
        println!("         {}", format!("{} lessons", lessons).dimmed());
    }

    Ok(())
}

pub fn edit(
    book: &mut Tutorbook,
    query: &str,
    name: Option<String>,
    subject: Option<String>,
    contact: Option<String>,
    level: Option<EducationLevel>,
) -> Result<()> {
    let id = resolve_student(book.state(), query)?.id.clone();

    let patch = StudentPatch {
        name: name.and_then(non_empty),
        subject: subject.and_then(non_empty),
        // Contact may be cleared with an empty string.
        contact: contact.map(|c| c.trim().to_string()),
        level,
    };

    if patch.is_empty() {
        println!("{}", "Nothing to change".dimmed());
        return Ok(());
    }

    book.update_student(&id, &patch)?;

    if let Some(student) = book.state().student(&id) {
        println!("  Updated: {}", student.render());
    }
    Ok(())
}

pub fn delete(book: &mut Tutorbook, query: &str, yes: bool) -> Result<()> {
    let student = resolve_student(book.state(), query)?;
    let id = student.id.clone();
    let name = student.name.clone();
    let lessons = book.state().lessons_of(&id).count();

    let prompt = format!(
        "Delete {} and {} {} scheduled with them?",
        name,
        lessons,
        if lessons == 1 { "lesson" } else { "lessons" }
    );
    if !confirm(&prompt, yes)? {
        return Ok(());
    }

    let removed = book.delete_student(&id)?;

    println!("{}", format!("  Deleted: {} ({} lessons removed)", name, removed).red());
    Ok(())
}
