use chrono::{DateTime, Utc};
use rand::Rng;

use quiz_core::Clock;
use quiz_core::model::{Question, QuizConfig};

use super::partition::partition_bank;
use super::service::QuizSession;
use crate::error::SessionError;

/// Orchestrates session start, the cooperative expiry check, and restarts.
///
/// Owns the time source so the session machinery stays deterministic under
/// test; the random source is passed in by the caller for the same reason.
#[derive(Debug, Clone)]
pub struct SessionLoopService {
    clock: Clock,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self { clock }
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Partitions the bank and starts a fresh attempt.
    ///
    /// Starting over with a changed configuration goes through here too: the
    /// bank is reshuffled, the partition is rebuilt, and nothing of the old
    /// attempt survives: set membership changes meaning, so index-keyed
    /// answers must not be carried across.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` when the bank holds no questions.
    pub fn start_session<R: Rng + ?Sized>(
        &self,
        bank: Vec<Question>,
        config: QuizConfig,
        rng: &mut R,
    ) -> Result<QuizSession, SessionError> {
        let sets = partition_bank(bank, config.requested_sets(), rng);
        QuizSession::new(sets, config, self.clock.now())
    }

    /// Expiry check for one render cycle.
    ///
    /// Auto-submits the attempt the first time expiry is observed and
    /// returns true only on the cycle that performed the transition; while
    /// time remains, and on every cycle after submission, it does nothing.
    /// Expiry is therefore detected within one render interval, not at the
    /// exact wall-clock instant.
    pub fn tick(&self, session: &mut QuizSession) -> bool {
        if session.is_submitted() || !session.is_expired(self.clock.now()) {
            return false;
        }

        // First observation of expiry; submit cannot fail on an active
        // attempt.
        session.submit().is_ok()
    }

    /// Starts the same attempt over, keeping the partition.
    pub fn restart(&self, session: &mut QuizSession) {
        session.reset(self.clock.now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::time::{fixed_clock, fixed_now};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bank() -> Vec<Question> {
        (0..6)
            .map(|n| {
                Question::new(format!("Q{n}"), vec!["yes".into(), "no".into()], "yes").unwrap()
            })
            .collect()
    }

    fn started_session() -> QuizSession {
        let mut rng = StdRng::seed_from_u64(1);
        SessionLoopService::new(fixed_clock())
            .start_session(bank(), QuizConfig::default_exam(), &mut rng)
            .unwrap()
    }

    #[test]
    fn start_session_partitions_and_stamps_start_time() {
        let session = started_session();

        assert_eq!(session.set_count(), 3);
        assert_eq!(session.started_at(), fixed_now());
        assert!(!session.is_submitted());
    }

    #[test]
    fn start_session_rejects_empty_bank() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = SessionLoopService::new(fixed_clock())
            .start_session(Vec::new(), QuizConfig::default_exam(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, SessionError::EmptyBank));
    }

    #[test]
    fn tick_does_nothing_while_time_remains() {
        let mut session = started_session();
        let service = SessionLoopService::new(Clock::fixed(fixed_now() + Duration::minutes(19)));

        assert!(!service.tick(&mut session));
        assert!(!session.is_submitted());
    }

    #[test]
    fn tick_auto_submits_exactly_once() {
        let mut session = started_session();
        session.record_answer(0, "yes").unwrap();
        let service = SessionLoopService::new(Clock::fixed(fixed_now() + Duration::minutes(21)));

        assert!(service.tick(&mut session));
        assert!(session.is_submitted());
        assert!(session.review_mode());
        assert_eq!(session.answer_for(0), Some("yes"));

        // Repeated expiry observations after the transition are no-ops.
        assert!(!service.tick(&mut session));
        assert!(!service.tick(&mut session));
        assert!(session.is_submitted());
    }

    #[test]
    fn tick_ignores_manually_submitted_attempts() {
        let mut session = started_session();
        session.submit().unwrap();
        let service = SessionLoopService::new(Clock::fixed(fixed_now() + Duration::hours(2)));

        assert!(!service.tick(&mut session));
    }

    #[test]
    fn restart_refreshes_the_attempt_clock() {
        let mut session = started_session();
        session.record_answer(0, "no").unwrap();
        session.submit().unwrap();

        let later = fixed_now() + Duration::minutes(30);
        let service = SessionLoopService::new(Clock::fixed(later));
        service.restart(&mut session);

        assert!(!session.is_submitted());
        assert_eq!(session.started_at(), later);
        assert_eq!(session.answer_for(0), None);
        assert_eq!(session.set_count(), 3);
    }
}
