mod config;
mod question;
mod score;

pub use config::{QuizConfig, QuizConfigError};
pub use question::{Question, QuestionError, QuestionSet};
pub use score::{ScoreError, ScoreSummary};
