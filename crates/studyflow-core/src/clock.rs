//! Clock abstraction.
//!
//! Recommendations are computed against the user's local wall clock: the
//! day-of-week and the offset into the local day are what the weekly
//! availability windows are defined in. The trait seam exists so the
//! engine and resolver can be exercised at a fixed instant in tests.

use chrono::{DateTime, Datelike, Local, Timelike, Utc, Weekday};

/// Supplies the current instant and its position within the local week.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Day of week of the local wall-clock day.
    fn day_of_week(&self) -> Weekday;

    /// Milliseconds elapsed since local midnight, in `[0, 86_400_000)`.
    fn millis_since_midnight(&self) -> i64;
}

/// Production clock reading `chrono::Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn day_of_week(&self) -> Weekday {
        Local::now().weekday()
    }

    fn millis_since_midnight(&self) -> i64 {
        let now = Local::now();
        i64::from(now.num_seconds_from_midnight()) * 1000
            + i64::from(now.timestamp_subsec_millis())
    }
}

/// Test double pinned to a fixed instant and local-day position.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
    pub day: Weekday,
    pub millis_of_day: i64,
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn day_of_week(&self) -> Weekday {
        self.day
    }

    fn millis_since_midnight(&self) -> i64 {
        self.millis_of_day
    }
}
