//! Shared error types for the services crate.

use thiserror::Error;

use storage::sqlite::SqliteInitError;

/// A question source could not deliver usable questions.
///
/// The loader recovers from these by switching to the bundled bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("trivia request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("trivia payload is malformed: {0}")]
    Payload(String),
    #[error("trivia service answered with response code {0}")]
    ResponseCode(i64),
    #[error("question source returned no usable questions")]
    Empty,
    #[error("bundled question bank is unreadable: {0}")]
    Bundle(#[from] serde_json::Error),
}

/// Errors emitted by the quiz session and its orchestration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("No questions available.")]
    NoQuestionsAvailable,
    #[error("quiz is not active")]
    NotActive,
    #[error("option {0} is out of range")]
    OptionOutOfRange(usize),
    #[error("quiz runner has stopped")]
    RunnerClosed,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
