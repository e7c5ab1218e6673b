//! Weekly session reminders.
//!
//! The core only decides *when* a reminder should fire -- the start of each
//! availability window, every week. Delivery belongs to the platform and
//! sits behind [`NotificationScheduler`]; scheduling is fire-and-forget and
//! the core expects no acknowledgement.

use chrono::Weekday;

use crate::model::WorkSession;

/// Consumed, not implemented, by the core.
pub trait NotificationScheduler {
    /// Arrange a recurring weekly reminder at the given local time.
    fn schedule_weekly(&self, day: Weekday, hour: u32, minute: u32);
}

/// Register a reminder for the start of a session's window.
pub fn schedule_session(scheduler: &dyn NotificationScheduler, session: &WorkSession) {
    scheduler.schedule_weekly(
        session.day_of_week,
        session.start_hour(),
        session.start_minute(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(Weekday, u32, u32)>>,
    }

    impl NotificationScheduler for Recorder {
        fn schedule_weekly(&self, day: Weekday, hour: u32, minute: u32) {
            self.calls.borrow_mut().push((day, hour, minute));
        }
    }

    #[test]
    fn schedules_at_window_start() {
        let recorder = Recorder::default();
        let session = WorkSession {
            id: 1,
            day_of_week: Weekday::Thu,
            start_ms: 19 * 3_600_000 + 15 * 60_000,
            end_ms: 21 * 3_600_000,
        };
        schedule_session(&recorder, &session);
        assert_eq!(recorder.calls.borrow()[..], [(Weekday::Thu, 19, 15)]);
    }
}
