use std::cell::Cell;
use time::{Duration, OffsetDateTime};

/// Source of "now" for every timestamp the service writes.
pub trait Clock {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Deterministic clock for tests and scenario replay.
///
/// Each call to `now` returns the current instant, then advances it by `step`.
#[derive(Clone, Debug)]
pub struct ManualClock {
    current: Cell<OffsetDateTime>,
    step: Duration,
}

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self::with_step(start, Duration::ZERO)
    }

    pub fn with_step(start: OffsetDateTime, step: Duration) -> Self {
        Self {
            current: Cell::new(start),
            step,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.current.set(self.current.get() + by);
    }

    pub fn set(&self, to: OffsetDateTime) {
        self.current.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        let now = self.current.get();
        self.current.set(now + self.step);
        now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn manual_clock_steps_after_each_read() {
        let clock = ManualClock::with_step(datetime!(2024-12-22 09:00 UTC), Duration::minutes(1));
        assert_eq!(clock.now(), datetime!(2024-12-22 09:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-12-22 09:01 UTC));
        clock.advance(Duration::hours(1));
        assert_eq!(clock.now(), datetime!(2024-12-22 10:02 UTC));
    }
}
