mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tutorbook_core::config::TutorbookConfig;
use tutorbook_core::lesson::{parse_date, parse_time};
use tutorbook_core::schedule::StatusFilter;
use tutorbook_core::{EducationLevel, LessonStatus, Theme, Tutorbook};

use commands::lesson::{LessonEdit, NewLesson};
use commands::{parse_minutes, parse_price};

#[derive(Parser)]
#[command(name = "tutorbook")]
#[command(about = "Keep track of your students, lessons and earnings")]
struct Cli {
    /// Use this data directory instead of the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the student roster
    Student {
        #[command(subcommand)]
        command: StudentCommand,
    },
    /// Schedule and resolve lessons
    Lesson {
        #[command(subcommand)]
        command: LessonCommand,
    },
    /// Earnings, planned lessons and what's next
    Dashboard {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the accent color
    Theme {
        /// blue, emerald, amber or violet
        theme: Option<Theme>,
    },
}

#[derive(Subcommand)]
enum StudentCommand {
    Add {
        name: String,

        #[arg(short, long)]
        subject: String,

        /// Phone, email or any other contact details
        #[arg(short, long)]
        contact: Option<String>,

        /// primary-school, high-school, final-exam or university
        #[arg(short, long, default_value = "high-school")]
        level: EducationLevel,
    },
    List {
        /// Only students whose name or subject contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    Edit {
        /// Student name or id prefix
        student: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(short, long)]
        subject: Option<String>,

        #[arg(short, long)]
        contact: Option<String>,

        #[arg(short, long)]
        level: Option<EducationLevel>,
    },
    /// Delete a student and every lesson scheduled with them
    Delete {
        /// Student name or id prefix
        student: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LessonCommand {
    Add {
        /// Student name or id prefix
        student: String,

        /// Lesson date (YYYY-MM-DD), defaults to today
        #[arg(short, long, value_parser = date_arg)]
        date: Option<NaiveDate>,

        /// Start time (HH:MM)
        #[arg(short, long, value_parser = time_arg)]
        time: Option<NaiveTime>,

        /// Length, e.g. "60", "45m" or "1h30m"
        #[arg(long, value_parser = parse_minutes)]
        duration: Option<u32>,

        #[arg(short, long, value_parser = parse_price)]
        price: Option<f64>,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Repeat every week through this date (YYYY-MM-DD, inclusive)
        #[arg(short, long, value_parser = date_arg)]
        until: Option<NaiveDate>,
    },
    List {
        /// Only lessons whose student name or topic contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// all, planned, completed or cancelled
        #[arg(long, default_value = "all")]
        status: StatusFilter,

        /// Also show past lessons, most recent first
        #[arg(long)]
        history: bool,
    },
    Edit {
        /// Lesson id prefix
        lesson: String,

        /// Student name or id prefix
        #[arg(long)]
        student: Option<String>,

        #[arg(short, long, value_parser = date_arg)]
        date: Option<NaiveDate>,

        #[arg(short, long, value_parser = time_arg)]
        time: Option<NaiveTime>,

        #[arg(long, value_parser = parse_minutes)]
        duration: Option<u32>,

        #[arg(short, long, value_parser = parse_price)]
        price: Option<f64>,

        /// New topic ("" clears it)
        #[arg(long)]
        topic: Option<String>,

        /// New notes ("" clears them)
        #[arg(long)]
        notes: Option<String>,

        /// Overwrite the status directly
        #[arg(long)]
        status: Option<LessonStatus>,
    },
    /// Mark a planned lesson as completed
    Done {
        /// Lesson id prefix
        lesson: String,
    },
    /// Cancel a planned lesson
    Cancel {
        /// Lesson id prefix
        lesson: String,
    },
    Delete {
        /// Lesson id prefix
        lesson: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = TutorbookConfig::load()?;
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| cfg.data_path());
    let mut book = Tutorbook::open_dir(&data_dir)
        .with_context(|| format!("Failed to open tutorbook data in {}", data_dir.display()))?;

    let today = commands::today();
    tracing::debug!(data_dir = %data_dir.display(), %today, "opened tutorbook");

    match cli.command {
        Commands::Student { command } => match command {
            StudentCommand::Add {
                name,
                subject,
                contact,
                level,
            } => commands::student::add(&mut book, name, subject, contact, level),
            StudentCommand::List { search } => commands::student::list(&book, search),
            StudentCommand::Edit {
                student,
                name,
                subject,
                contact,
                level,
            } => commands::student::edit(&mut book, &student, name, subject, contact, level),
            StudentCommand::Delete { student, yes } => {
                commands::student::delete(&mut book, &student, yes)
            }
        },
        Commands::Lesson { command } => match command {
            LessonCommand::Add {
                student,
                date,
                time,
                duration,
                price,
                topic,
                notes,
                until,
            } => {
                let new = NewLesson {
                    student,
                    date,
                    time,
                    duration,
                    price,
                    topic,
                    notes,
                    until,
                };
                commands::lesson::add(&mut book, &cfg, new, today)
            }
            LessonCommand::List {
                search,
                status,
                history,
            } => commands::lesson::list(&book, search, status, history, today),
            LessonCommand::Edit {
                lesson,
                student,
                date,
                time,
                duration,
                price,
                topic,
                notes,
                status,
            } => {
                let edit = LessonEdit {
                    student,
                    date,
                    time,
                    duration,
                    price,
                    topic,
                    notes,
                    status,
                };
                commands::lesson::edit(&mut book, &lesson, edit)
            }
            LessonCommand::Done { lesson } => commands::lesson::complete(&mut book, &lesson),
            LessonCommand::Cancel { lesson } => commands::lesson::cancel(&mut book, &lesson),
            LessonCommand::Delete { lesson, yes } => {
                commands::lesson::delete(&mut book, &lesson, yes)
            }
        },
        Commands::Dashboard { json } => commands::dashboard::run(&book, today, json),
        Commands::Theme { theme } => commands::theme::run(&mut book, theme),
    }
}

/// Log to stderr so command output stays clean. RUST_LOG overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

fn time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_time(s).map_err(|e| e.to_string())
}
