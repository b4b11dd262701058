//! Question-bank loading.
//!
//! The bank is a read-only JSON file holding an array of records with
//! `question` (or `text`), `options`, and `correct_answer`. Records pass
//! through the validating `Question` constructor on the way in; a malformed
//! record fails the whole load instead of being dropped silently.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use quiz_core::model::Question;

use crate::error::BankError;

/// Raw on-disk shape of one question record.
#[derive(Debug, Deserialize)]
struct QuestionRecord {
    #[serde(alias = "text")]
    question: String,
    options: Vec<String>,
    correct_answer: String,
}

impl QuestionRecord {
    fn into_question(self) -> Result<Question, BankError> {
        Ok(Question::new(self.question, self.options, self.correct_answer)?)
    }
}

/// Loads and validates the question bank from a JSON file.
///
/// # Errors
///
/// Returns `BankError::Io` when the file is missing or unreadable,
/// `BankError::Parse` for malformed JSON, `BankError::Question` when a
/// record fails validation, and `BankError::Empty` when the file holds no
/// questions.
pub fn load_bank(path: impl AsRef<Path>) -> Result<Vec<Question>, BankError> {
    let raw = fs::read_to_string(path)?;
    parse_bank(&raw)
}

/// Parses and validates a question bank from JSON text.
///
/// # Errors
///
/// Same as [`load_bank`], minus `BankError::Io`.
pub fn parse_bank(raw: &str) -> Result<Vec<Question>, BankError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(raw)?;
    if records.is_empty() {
        return Err(BankError::Empty);
    }

    records
        .into_iter()
        .map(QuestionRecord::into_question)
        .collect()
}
