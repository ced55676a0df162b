use anyhow::Result;
use owo_colors::OwoColorize;
use tutorbook_core::{Theme, Tutorbook};

use crate::render::accent;

/// Show the themes, or switch to `theme` when given.
pub fn run(book: &mut Tutorbook, theme: Option<Theme>) -> Result<()> {
    if let Some(theme) = theme {
        book.set_theme(theme)?;
    }

    let current = book.state().theme;
    for theme in Theme::ALL {
        let marker = if theme == current { "●" } else { " " };
        let line = format!("{} {}", marker, theme);
        if theme == current {
            println!("  {}", accent(theme, &line).bold());
        } else {
            println!("  {}", accent(theme, &line).dimmed());
        }
    }

    Ok(())
}
