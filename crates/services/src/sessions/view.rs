use chrono::{DateTime, Utc};

use quiz_core::model::ScoreSummary;

use super::progress::SessionProgress;
use super::review::{OptionTag, tag_for};
use super::service::QuizSession;

/// One option paired with its review tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedOption {
    pub option: String,
    pub tag: OptionTag,
}

/// What the rendering layer should do with one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionViewMode {
    /// Solicit a single choice among the options, with no pre-selected
    /// default.
    Solicit { options: Vec<String> },
    /// Reveal correctness per option.
    Review { options: Vec<TaggedOption> },
    /// Submitted with review mode off: echo the recorded answer (or its
    /// absence) without revealing correctness.
    Recorded { user_answer: Option<String> },
}

/// Render instruction for a single question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based position within the active set.
    pub number: usize,
    pub text: String,
    pub mode: QuestionViewMode,
}

/// Set picker control state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPickerView {
    pub set_count: usize,
    /// 0-based index of the active set.
    pub selected: usize,
    /// Disabled once the attempt is submitted.
    pub enabled: bool,
}

/// Presentation-agnostic snapshot of a session, re-derived from state on
/// every render cycle.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The rendering layer decides countdown formatting, labels, and colors.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub set_picker: SetPickerView,
    /// Whole seconds left on the attempt clock; `None` once submitted.
    pub countdown_seconds: Option<i64>,
    pub progress: SessionProgress,
    pub questions: Vec<QuestionView>,
    /// Grading metrics, present only once submitted.
    pub score: Option<ScoreSummary>,
    pub pass_threshold_percent: u32,
    pub submitted: bool,
    pub review_mode: bool,
}

impl SessionView {
    /// Recomputes everything the rendering layer needs from current state.
    ///
    /// Projection never mutates the session, so rendering as often as the
    /// front-end likes cannot disturb recorded answers.
    #[must_use]
    pub fn project(session: &QuizSession, now: DateTime<Utc>) -> Self {
        let questions = session
            .active_set()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let mode = if !session.is_submitted() {
                    QuestionViewMode::Solicit {
                        options: question.options().to_vec(),
                    }
                } else if session.review_mode() {
                    QuestionViewMode::Review {
                        options: question
                            .options()
                            .iter()
                            .map(|option| TaggedOption {
                                option: option.clone(),
                                tag: tag_for(
                                    option,
                                    question.correct_answer(),
                                    session.answer_for(index),
                                ),
                            })
                            .collect(),
                    }
                } else {
                    QuestionViewMode::Recorded {
                        user_answer: session.answer_for(index).map(str::to_owned),
                    }
                };

                QuestionView {
                    number: index + 1,
                    text: question.text().to_owned(),
                    mode,
                }
            })
            .collect();

        let countdown_seconds = if session.is_submitted() {
            None
        } else {
            Some(session.remaining(now).num_seconds())
        };

        Self {
            set_picker: SetPickerView {
                set_count: session.set_count(),
                selected: session.selected_set(),
                enabled: !session.is_submitted(),
            },
            countdown_seconds,
            progress: session.progress(),
            questions,
            score: session.score().ok(),
            pass_threshold_percent: session.config().pass_threshold_percent(),
            submitted: session.is_submitted(),
            review_mode: session.review_mode(),
        }
    }
}
