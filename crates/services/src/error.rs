//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, ScoreError};

/// Errors emitted while loading the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("could not read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("question file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("question file contains no questions")]
    Empty,
}

/// Errors emitted by quiz sessions.
///
/// The selection variants (`QuestionOutOfRange`, `UnknownOption`,
/// `SetOutOfRange`) signal a rendering layer that broke its contract; an
/// honest front-end only offers choices the session actually holds.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for a session")]
    EmptyBank,

    #[error("attempt already submitted")]
    AlreadySubmitted,

    #[error("attempt not submitted yet")]
    NotSubmitted,

    #[error("question index {index} is out of range for the active set of {len}")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option:?} is not one of the question's options")]
    UnknownOption { option: String },

    #[error("set index {index} is out of range for {len} sets")]
    SetOutOfRange { index: usize, len: usize },

    #[error("set picker is locked after submission")]
    SetLocked,

    #[error(transparent)]
    Score(#[from] ScoreError),
}
