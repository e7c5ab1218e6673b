//! Recommendation engine.
//!
//! Folds the task list, the weekly availability windows, and the clock into
//! one answer: is it study time, and if so, what should be studied. The
//! snapshot is recomputed whole and swapped atomically; observers never see
//! a fresh session paired with a stale task ordering. The engine has no
//! internal threads -- the owner calls `refresh()` on record changes and on
//! a fixed cadence ([`REFRESH_INTERVAL_SECS`]).

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::model::{Task, WorkSession};
use crate::resolver;
use crate::score;
use crate::storage::Store;

/// Cadence for time-driven refreshes when no record changes.
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// The derived snapshot telling the user whether it's study time and which
/// task to do. Never mutated in place; each recomputation builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Recommendation {
    /// All tasks, best first.
    pub tasks: Vec<Task>,
    pub active_session: Option<WorkSession>,
    pub next_session: Option<WorkSession>,
    /// Highest-ranked task not yet completed.
    pub recommended_task: Option<Task>,
    pub is_study_time: bool,
    pub computed_at: Option<DateTime<Utc>>,
}

/// Pure recomputation. Empty inputs are valid and yield an all-empty state.
pub fn recompute(
    mut tasks: Vec<Task>,
    sessions: &[WorkSession],
    now: DateTime<Utc>,
    day: Weekday,
    millis_of_day: i64,
) -> Recommendation {
    score::rank(&mut tasks, now);

    let active_session = resolver::find_active_session(sessions, day, millis_of_day).cloned();
    let next_session = resolver::find_next_session(sessions, day, millis_of_day).cloned();
    let recommended_task = tasks.iter().find(|t| !t.is_completed).cloned();
    let is_study_time = active_session.is_some();

    Recommendation {
        tasks,
        active_session,
        next_session,
        recommended_task,
        is_study_time,
        computed_at: Some(now),
    }
}

/// Owns the latest snapshot. `&mut self` on `refresh` is the "exactly one
/// recomputation in flight" guarantee; construct one engine per consumer
/// and drop it on teardown.
#[derive(Debug, Default)]
pub struct RecommendationEngine {
    state: Recommendation,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last computed snapshot; empty until the first refresh.
    pub fn state(&self) -> &Recommendation {
        &self.state
    }

    /// Recompute from fresh store snapshots and atomically replace the
    /// held state.
    pub fn refresh(&mut self, store: &dyn Store, clock: &dyn Clock) -> Result<&Recommendation> {
        let tasks = store.list_tasks()?;
        let sessions = store.list_sessions()?;
        self.state = recompute(
            tasks,
            &sessions,
            clock.now(),
            clock.day_of_week(),
            clock.millis_since_midnight(),
        );
        Ok(&self.state)
    }
}
