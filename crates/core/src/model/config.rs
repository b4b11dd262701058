use chrono::Duration;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizConfigError {
    #[error("requested set count must be between 1 and 100")]
    InvalidSetCount,

    #[error("time limit must be between 1 and 120 minutes")]
    InvalidTimeLimit,

    #[error("pass threshold must be between 0 and 100 percent")]
    InvalidPassThreshold,
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// Attempt-wide settings: how the bank is partitioned, how long the attempt
/// may run, and the score required to pass.
///
/// The requested set count is an upper bound; partitioning clamps it to the
/// bank size so no set ends up empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    requested_sets: u32,
    time_limit_minutes: u32,
    pass_threshold_percent: u32,
}

impl QuizConfig {
    /// Default exam settings: 3 sets, 20 minutes, 70 % to pass.
    #[must_use]
    pub fn default_exam() -> Self {
        Self {
            requested_sets: 3,
            time_limit_minutes: 20,
            pass_threshold_percent: 70,
        }
    }

    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any value falls outside its bounds.
    pub fn new(
        requested_sets: u32,
        time_limit_minutes: u32,
        pass_threshold_percent: u32,
    ) -> Result<Self, QuizConfigError> {
        if !(1..=100).contains(&requested_sets) {
            return Err(QuizConfigError::InvalidSetCount);
        }
        if !(1..=120).contains(&time_limit_minutes) {
            return Err(QuizConfigError::InvalidTimeLimit);
        }
        if pass_threshold_percent > 100 {
            return Err(QuizConfigError::InvalidPassThreshold);
        }

        Ok(Self {
            requested_sets,
            time_limit_minutes,
            pass_threshold_percent,
        })
    }

    // Accessors
    #[must_use]
    pub fn requested_sets(&self) -> u32 {
        self.requested_sets
    }

    #[must_use]
    pub fn time_limit_minutes(&self) -> u32 {
        self.time_limit_minutes
    }

    #[must_use]
    pub fn pass_threshold_percent(&self) -> u32 {
        self.pass_threshold_percent
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        Duration::minutes(i64::from(self.time_limit_minutes))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_exam() {
        let config = QuizConfig::default_exam();
        assert_eq!(config.requested_sets(), 3);
        assert_eq!(config.time_limit_minutes(), 20);
        assert_eq!(config.pass_threshold_percent(), 70);
        assert_eq!(config.time_limit(), Duration::minutes(20));
    }

    #[test]
    fn config_rejects_zero_sets() {
        let err = QuizConfig::new(0, 20, 70).unwrap_err();
        assert_eq!(err, QuizConfigError::InvalidSetCount);

        let err = QuizConfig::new(101, 20, 70).unwrap_err();
        assert_eq!(err, QuizConfigError::InvalidSetCount);
    }

    #[test]
    fn config_rejects_invalid_time_limit() {
        let err = QuizConfig::new(3, 0, 70).unwrap_err();
        assert_eq!(err, QuizConfigError::InvalidTimeLimit);

        let err = QuizConfig::new(3, 121, 70).unwrap_err();
        assert_eq!(err, QuizConfigError::InvalidTimeLimit);
    }

    #[test]
    fn config_rejects_threshold_over_100() {
        let err = QuizConfig::new(3, 20, 101).unwrap_err();
        assert_eq!(err, QuizConfigError::InvalidPassThreshold);
    }

    #[test]
    fn config_accepts_zero_threshold() {
        let config = QuizConfig::new(1, 1, 0).unwrap();
        assert_eq!(config.pass_threshold_percent(), 0);
    }
}
