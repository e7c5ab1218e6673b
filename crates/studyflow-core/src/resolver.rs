//! Weekly schedule resolution.
//!
//! Maps "where are we in the local week" onto the recurring availability
//! windows. Windows are half-open `[start, end)`: a session is still active
//! at its start instant and no longer active at its end instant. Lookahead
//! stops at local midnight; tomorrow's sessions are never considered.

use chrono::Weekday;

use crate::model::WorkSession;

/// The session covering `millis_of_day` on `day`, if any.
///
/// Overlapping same-day sessions are a modeling error upstream; when they
/// occur anyway, the session with the earliest `start_ms` wins.
pub fn find_active_session(
    sessions: &[WorkSession],
    day: Weekday,
    millis_of_day: i64,
) -> Option<&WorkSession> {
    sessions
        .iter()
        .filter(|s| {
            s.day_of_week == day && millis_of_day >= s.start_ms && millis_of_day < s.end_ms
        })
        .min_by_key(|s| s.start_ms)
}

/// The next session later today: minimum `start_ms` among sessions on `day`
/// starting strictly after `millis_of_day`. `None` when today is exhausted.
pub fn find_next_session(
    sessions: &[WorkSession],
    day: Weekday,
    millis_of_day: i64,
) -> Option<&WorkSession> {
    sessions
        .iter()
        .filter(|s| s.day_of_week == day && s.start_ms > millis_of_day)
        .min_by_key(|s| s.start_ms)
}
