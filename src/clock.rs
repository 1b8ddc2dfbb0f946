//! Time source for publish-state and archive year checks.

use chrono::{DateTime, Datelike, Utc};

/// Source of the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar year.
    fn current_year(&self) -> i32 {
        self.now().year()
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// True when `published` is set and not in the future relative to `now`.
pub fn is_published(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    published.is_some_and(|at| at <= now)
}
