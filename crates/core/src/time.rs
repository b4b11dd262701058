use chrono::{DateTime, Duration, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }
}

//
// ─── TIMER POLICY ──────────────────────────────────────────────────────────────
//

/// Time left before the limit elapses, clamped to zero.
///
/// A pure function of its inputs; expiry detection happens wherever the
/// caller chooses to evaluate it, so it is accurate to one evaluation
/// interval rather than to the exact wall-clock instant.
#[must_use]
pub fn remaining(started_at: DateTime<Utc>, limit: Duration, now: DateTime<Utc>) -> Duration {
    let left = limit - (now - started_at);
    if left < Duration::zero() {
        Duration::zero()
    } else {
        left
    }
}

/// True once the limit has fully elapsed.
#[must_use]
pub fn is_expired(started_at: DateTime<Utc>, limit: Duration, now: DateTime<Utc>) -> bool {
    remaining(started_at, limit, now).is_zero()
}

//
// ─── TEST TIME ─────────────────────────────────────────────────────────────────
//

/// Deterministic timestamp for tests and examples (2024-01-15T08:00:00Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_705_305_600;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
