use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("cannot score an empty question set")]
    EmptySet,

    #[error("correct count ({correct}) exceeds total ({total})")]
    CountMismatch { correct: u32, total: u32 },
}

/// Grading result for a submitted attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    correct: u32,
    total: u32,
    percent: f64,
    passed: bool,
}

impl ScoreSummary {
    /// Grades `correct` answers out of `total` against a pass threshold.
    ///
    /// The percentage is rounded half-up (away from zero) to two decimals;
    /// an attempt passes when the rounded percentage reaches the threshold.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::EmptySet` when `total` is zero; an empty set is
    /// refused rather than reported as a zero score. Returns
    /// `ScoreError::CountMismatch` when `correct` exceeds `total`.
    pub fn new(correct: u32, total: u32, pass_threshold_percent: u32) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::EmptySet);
        }
        if correct > total {
            return Err(ScoreError::CountMismatch { correct, total });
        }

        let percent = round_to_two(f64::from(correct) / f64::from(total) * 100.0);
        let passed = percent >= f64::from(pass_threshold_percent);

        Ok(Self {
            correct,
            total,
            percent,
            passed,
        })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }
}

fn round_to_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_seven_of_ten_at_seventy() {
        let score = ScoreSummary::new(7, 10, 70).unwrap();
        assert_eq!(score.correct(), 7);
        assert_eq!(score.total(), 10);
        assert!((score.percent() - 70.0).abs() < f64::EPSILON);
        assert!(score.passed());
    }

    #[test]
    fn score_seven_of_ten_fails_at_seventy_one() {
        let score = ScoreSummary::new(7, 10, 71).unwrap();
        assert!(!score.passed());
    }

    #[test]
    fn score_rounds_half_up_to_two_decimals() {
        let third = ScoreSummary::new(1, 3, 0).unwrap();
        assert!((third.percent() - 33.33).abs() < f64::EPSILON);

        let two_thirds = ScoreSummary::new(2, 3, 0).unwrap();
        assert!((two_thirds.percent() - 66.67).abs() < f64::EPSILON);

        let eighth = ScoreSummary::new(1, 8, 0).unwrap();
        assert!((eighth.percent() - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn score_refuses_empty_set() {
        let err = ScoreSummary::new(0, 0, 70).unwrap_err();
        assert_eq!(err, ScoreError::EmptySet);
    }

    #[test]
    fn score_rejects_correct_above_total() {
        let err = ScoreSummary::new(3, 2, 70).unwrap_err();
        assert_eq!(
            err,
            ScoreError::CountMismatch {
                correct: 3,
                total: 2
            }
        );
    }

    #[test]
    fn score_zero_threshold_always_passes() {
        let score = ScoreSummary::new(0, 4, 0).unwrap();
        assert!((score.percent() - 0.0).abs() < f64::EPSILON);
        assert!(score.passed());
    }
}
