//! Error types for tutorbook.

use thiserror::Error;

/// Errors that can occur in tutorbook operations.
#[derive(Error, Debug)]
pub enum TutorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for tutorbook operations.
pub type TutorResult<T> = Result<T, TutorError>;
