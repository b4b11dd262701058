use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};

use quiz_core::model::{Question, QuestionSet, QuizConfig, ScoreSummary};
use quiz_core::time;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one quiz attempt.
///
/// Owns the partitioned sets, the answer map, and the ACTIVE → SUBMITTED
/// flags. Answers are keyed by question index within the active set and are
/// written only through [`QuizSession::record_answer`]; they outlive any
/// rendering pass and survive set switches, and nothing besides an explicit
/// [`QuizSession::reset`] discards them while the attempt is active.
pub struct QuizSession {
    config: QuizConfig,
    sets: Vec<QuestionSet>,
    selected_set: usize,
    answers: HashMap<usize, String>,
    submitted: bool,
    review_mode: bool,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Creates a session over freshly partitioned sets.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` when there are no sets or every set
    /// is empty.
    pub fn new(
        sets: Vec<QuestionSet>,
        config: QuizConfig,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if sets.iter().all(Vec::is_empty) {
            return Err(SessionError::EmptyBank);
        }

        Ok(Self {
            config,
            sets,
            selected_set: 0,
            answers: HashMap::new(),
            submitted: false,
            review_mode: false,
            started_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    #[must_use]
    pub fn selected_set(&self) -> usize {
        self.selected_set
    }

    /// The set this attempt currently runs against.
    #[must_use]
    pub fn active_set(&self) -> &[Question] {
        &self.sets[self.selected_set]
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    #[must_use]
    pub fn review_mode(&self) -> bool {
        self.review_mode
    }

    /// The recorded option for a question, if any. Absence means
    /// "unanswered", never "answered incorrectly".
    #[must_use]
    pub fn answer_for(&self, question_index: usize) -> Option<&str> {
        self.answers.get(&question_index).map(String::as_str)
    }

    /// Answer progress over the active set.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.active_set().len();
        let answered = (0..total)
            .filter(|index| self.answers.contains_key(index))
            .count();
        SessionProgress {
            total,
            answered,
            unanswered: total - answered,
        }
    }

    /// Time left on the attempt clock, clamped to zero.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        time::remaining(self.started_at, self.config.time_limit(), now)
    }

    /// True once the configured limit has elapsed.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        time::is_expired(self.started_at, self.config.time_limit(), now)
    }

    // Mutations

    /// Selects which set the attempt runs against.
    ///
    /// Recorded answers are keyed by question index and survive the switch.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::SetLocked` once submitted (scoring must read
    /// the same set that was answered) and `SessionError::SetOutOfRange`
    /// outside the partition.
    pub fn select_set(&mut self, index: usize) -> Result<(), SessionError> {
        if self.submitted {
            return Err(SessionError::SetLocked);
        }
        let len = self.sets.len();
        if index >= len {
            return Err(SessionError::SetOutOfRange { index, len });
        }

        self.selected_set = index;
        Ok(())
    }

    /// Records the chosen option for a question, overwriting any earlier
    /// choice for that index.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` once the attempt is frozen,
    /// `SessionError::QuestionOutOfRange` for an index outside the active
    /// set, and `SessionError::UnknownOption` when the option does not belong
    /// to the question.
    pub fn record_answer(
        &mut self,
        question_index: usize,
        option: &str,
    ) -> Result<(), SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }

        let set = self.active_set();
        let len = set.len();
        let Some(question) = set.get(question_index) else {
            return Err(SessionError::QuestionOutOfRange {
                index: question_index,
                len,
            });
        };
        if !question.has_option(option) {
            return Err(SessionError::UnknownOption {
                option: option.to_owned(),
            });
        }

        self.answers.insert(question_index, option.to_owned());
        Ok(())
    }

    /// Freezes the attempt: no more answers, no more set switches.
    ///
    /// Review mode switches on with the first submission; the user may
    /// toggle it off afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadySubmitted` when the attempt is already
    /// frozen.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }

        self.submitted = true;
        self.review_mode = true;
        Ok(())
    }

    /// Flips review mode and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitted` while the attempt is active;
    /// there is nothing to review before submission.
    pub fn toggle_review(&mut self) -> Result<bool, SessionError> {
        if !self.submitted {
            return Err(SessionError::NotSubmitted);
        }

        self.review_mode = !self.review_mode;
        Ok(self.review_mode)
    }

    /// Grades the active set against the recorded answers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSubmitted` while the attempt is active;
    /// answers are only reconciled against correctness once frozen.
    pub fn score(&self) -> Result<ScoreSummary, SessionError> {
        if !self.submitted {
            return Err(SessionError::NotSubmitted);
        }

        let mut correct = 0_u32;
        let mut total = 0_u32;
        for (index, question) in self.active_set().iter().enumerate() {
            total = total.saturating_add(1);
            if self
                .answer_for(index)
                .is_some_and(|answer| answer == question.correct_answer())
            {
                correct = correct.saturating_add(1);
            }
        }

        Ok(ScoreSummary::new(
            correct,
            total,
            self.config.pass_threshold_percent(),
        )?)
    }

    /// Starts the attempt over: answers cleared, flags cleared, clock and
    /// set selection reset. The partition itself is kept.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.answers.clear();
        self.submitted = false;
        self.review_mode = false;
        self.selected_set = 0;
        self.started_at = now;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("set_count", &self.sets.len())
            .field("selected_set", &self.selected_set)
            .field("answers_len", &self.answers.len())
            .field("submitted", &self.submitted)
            .field("review_mode", &self.review_mode)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn question(n: usize) -> Question {
        Question::new(format!("Q{n}"), vec!["yes".into(), "no".into()], "yes").unwrap()
    }

    fn two_set_session() -> QuizSession {
        let sets = vec![
            vec![question(0), question(1), question(2)],
            vec![question(3), question(4)],
        ];
        QuizSession::new(sets, QuizConfig::default_exam(), fixed_now()).unwrap()
    }

    #[test]
    fn empty_partition_is_rejected() {
        let err = QuizSession::new(Vec::new(), QuizConfig::default_exam(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyBank));

        let err = QuizSession::new(vec![Vec::new()], QuizConfig::default_exam(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyBank));
    }

    #[test]
    fn record_overwrites_earlier_choice() {
        let mut session = two_set_session();

        session.record_answer(1, "no").unwrap();
        assert_eq!(session.answer_for(1), Some("no"));

        session.record_answer(1, "yes").unwrap();
        assert_eq!(session.answer_for(1), Some("yes"));
        assert_eq!(session.answer_for(0), None);
    }

    #[test]
    fn record_rejects_contract_violations() {
        let mut session = two_set_session();

        let err = session.record_answer(9, "yes").unwrap_err();
        assert!(matches!(
            err,
            SessionError::QuestionOutOfRange { index: 9, len: 3 }
        ));

        let err = session.record_answer(0, "maybe").unwrap_err();
        assert!(matches!(err, SessionError::UnknownOption { .. }));
    }

    #[test]
    fn submission_freezes_answers_and_sets() {
        let mut session = two_set_session();
        session.record_answer(0, "yes").unwrap();
        session.submit().unwrap();

        assert!(session.is_submitted());
        assert!(session.review_mode());

        let err = session.record_answer(0, "no").unwrap_err();
        assert!(matches!(err, SessionError::AlreadySubmitted));
        assert_eq!(session.answer_for(0), Some("yes"));

        let err = session.select_set(1).unwrap_err();
        assert!(matches!(err, SessionError::SetLocked));

        let err = session.submit().unwrap_err();
        assert!(matches!(err, SessionError::AlreadySubmitted));
    }

    #[test]
    fn answers_survive_set_switches() {
        let mut session = two_set_session();
        session.record_answer(2, "no").unwrap();

        session.select_set(1).unwrap();
        session.select_set(0).unwrap();
        assert_eq!(session.answer_for(2), Some("no"));
    }

    #[test]
    fn review_toggle_requires_submission() {
        let mut session = two_set_session();
        let err = session.toggle_review().unwrap_err();
        assert!(matches!(err, SessionError::NotSubmitted));

        session.submit().unwrap();
        assert!(!session.toggle_review().unwrap());
        assert!(session.toggle_review().unwrap());
    }

    #[test]
    fn score_requires_submission_and_counts_matches() {
        let mut session = two_set_session();
        assert!(matches!(
            session.score().unwrap_err(),
            SessionError::NotSubmitted
        ));

        session.record_answer(0, "yes").unwrap();
        session.record_answer(1, "no").unwrap();
        // question 2 left unanswered
        session.submit().unwrap();

        let score = session.score().unwrap();
        assert_eq!(score.correct(), 1);
        assert_eq!(score.total(), 3);
    }

    #[test]
    fn progress_counts_only_in_range_answers() {
        let mut session = two_set_session();
        session.record_answer(0, "yes").unwrap();
        session.record_answer(2, "no").unwrap();

        let progress = session.progress();
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 2);
        assert_eq!(progress.unanswered, 1);

        // The second set has two questions; the answer recorded at index 2
        // does not exist there and must not count.
        session.select_set(1).unwrap();
        let progress = session.progress();
        assert_eq!(progress.total, 2);
        assert_eq!(progress.answered, 1);
    }

    #[test]
    fn reset_returns_to_a_fresh_active_state() {
        let mut session = two_set_session();
        session.select_set(1).unwrap();
        session.record_answer(0, "yes").unwrap();
        session.submit().unwrap();

        let later = fixed_now() + Duration::minutes(45);
        session.reset(later);

        assert!(!session.is_submitted());
        assert!(!session.review_mode());
        assert_eq!(session.selected_set(), 0);
        assert_eq!(session.answer_for(0), None);
        assert_eq!(session.started_at(), later);
        assert_eq!(session.progress().answered, 0);
    }

    #[test]
    fn remaining_tracks_the_config_limit() {
        let session = two_set_session();
        let start = fixed_now();

        assert_eq!(session.remaining(start), Duration::minutes(20));
        assert!(!session.is_expired(start + Duration::minutes(19)));
        assert!(session.is_expired(start + Duration::minutes(20)));
    }
}
