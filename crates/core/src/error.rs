use thiserror::Error;

use crate::model::{QuestionError, QuizConfigError, ScoreError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Config(#[from] QuizConfigError),
    #[error(transparent)]
    Score(#[from] ScoreError),
}
