use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question needs at least two options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct answer {answer:?} is not one of the options")]
    UnknownCorrectAnswer { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question.
///
/// Option order is meaningful and preserved; the correct answer is guaranteed
/// to match one of the options exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer: String,
}

/// One disjoint slice of the bank, assigned to a single attempt.
pub type QuestionSet = Vec<Question>;

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyText` if the text is empty or
    /// whitespace-only, `QuestionError::TooFewOptions` for fewer than two
    /// options, and `QuestionError::UnknownCorrectAnswer` when the correct
    /// answer does not equal any option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }

        let correct_answer = correct_answer.into();
        if !options.iter().any(|option| *option == correct_answer) {
            return Err(QuestionError::UnknownCorrectAnswer {
                answer: correct_answer,
            });
        }

        Ok(Self {
            text: text.trim().to_owned(),
            options,
            correct_answer,
        })
    }

    // Accessors
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// True when `option` is one of this question's options.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
