//! Task scoring.
//!
//! A task's rank combines user priority with deadline urgency. The function
//! is pure and total for all finite inputs: overdue deadlines and
//! zero-minutes-remaining are handled by the bonus branch and the `+1`
//! guard, never by errors. Priority outside `[1, 5]` is a contract
//! violation rejected at the input boundary ([`crate::model::Task::validate`]),
//! not re-checked here.

use chrono::{DateTime, Utc};

use crate::model::Task;

/// Flat bonus for overdue tasks. Dominates any achievable non-overdue
/// importance, so overdue tasks always sort first among their peers.
pub const OVERDUE_BONUS: i64 = 1_000_000;

/// Numerator of the hyperbolic urgency term.
pub const URGENCY_SCALE: i64 = 100_000_000;

/// Points per priority step; priority 1 earns `5 * 1000`, priority 5 `1000`.
pub const IMPORTANCE_STEP: i64 = 1_000;

/// Score a task at instant `now`. Higher = more important.
///
/// - overdue: `OVERDUE_BONUS + importance`
/// - otherwise: `importance + URGENCY_SCALE / (whole_minutes_remaining + 1)`,
///   decaying hyperbolically toward zero as the deadline recedes.
pub fn score(task: &Task, now: DateTime<Utc>) -> i64 {
    let importance = (6 - i64::from(task.priority)) * IMPORTANCE_STEP;
    let time_remaining = task.deadline.timestamp_millis() - now.timestamp_millis();

    if time_remaining < 0 {
        OVERDUE_BONUS + importance
    } else {
        let urgency = URGENCY_SCALE / (time_remaining / 60_000 + 1);
        importance + urgency
    }
}

/// Sort tasks by descending score. The sort is stable, so equal scores keep
/// the incoming (insertion/id) order.
pub fn rank(tasks: &mut [Task], now: DateTime<Utc>) {
    tasks.sort_by_key(|t| std::cmp::Reverse(score(t, now)));
}
