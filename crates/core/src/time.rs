use chrono::{DateTime, TimeDelta, Utc};

/// Source of "now" for completion stamps and fetched question ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn unix_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// 2023-11-14T22:13:20Z, the instant behind [`fixed_now`].
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Deterministic instant for tests.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::seconds(FIXED_TEST_TIMESTAMP)
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
