//! Wall-clock capability.
//!
//! The engine never reads time directly; it goes through [`Clock`] so the
//! activation gate and the disable record can be tested against fixed dates.

use chrono::{Datelike, Local, NaiveTime, TimeZone};

/// Source of the current local time.
pub trait Clock {
    /// Current time as epoch milliseconds.
    fn now_ms(&self) -> i64;

    /// Current local `(month, day)`, both 1-based.
    fn today(&self) -> (u32, u32);

    /// Epoch milliseconds of the last instant of the current local day.
    fn end_of_day_ms(&self) -> i64;
}

/// The real clock, backed by the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Local::now().timestamp_millis()
    }

    fn today(&self) -> (u32, u32) {
        let now = Local::now();
        (now.month(), now.day())
    }

    fn end_of_day_ms(&self) -> i64 {
        let now = Local::now();
        let Some(last_instant) = NaiveTime::from_hms_milli_opt(23, 59, 59, 999) else {
            return now.timestamp_millis();
        };
        let end = now.date_naive().and_time(last_instant);
        // DST transitions can make a local time ambiguous or skipped.
        Local
            .from_local_datetime(&end)
            .earliest()
            .map_or_else(|| now.timestamp_millis(), |dt| dt.timestamp_millis())
    }
}

/// A clock pinned to a fixed instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    /// Value returned by [`Clock::now_ms`].
    pub now_ms: i64,
    /// Month returned by [`Clock::today`].
    pub month: u32,
    /// Day returned by [`Clock::today`].
    pub day: u32,
    /// Value returned by [`Clock::end_of_day_ms`].
    pub end_of_day_ms: i64,
}

impl FixedClock {
    /// A fixed clock set to noon on Halloween.
    #[must_use]
    pub fn halloween() -> Self {
        Self {
            now_ms: 1_000_000,
            month: 10,
            day: 31,
            end_of_day_ms: 2_000_000,
        }
    }

    /// A fixed clock set to a mid-June day, outside every default window.
    #[must_use]
    pub fn midsummer() -> Self {
        Self {
            now_ms: 1_000_000,
            month: 6,
            day: 15,
            end_of_day_ms: 2_000_000,
        }
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }

    fn today(&self) -> (u32, u32) {
        (self.month, self.day)
    }

    fn end_of_day_ms(&self) -> i64 {
        self.end_of_day_ms
    }
}
