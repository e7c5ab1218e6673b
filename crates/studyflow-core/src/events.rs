//! Engine events.
//!
//! Every timer transition and session commit produces an `Event`. The CLI
//! prints them as JSON; a GUI layer would poll for them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerState;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A task was loaded into the timer; full duration restored.
    TimerLoaded {
        task_id: i64,
        total_ms: i64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        task_id: i64,
        remaining_ms: i64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_ms: i64,
        accumulated_ms: i64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_ms: i64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. The session is not finished yet; logging
    /// the time still takes an explicit finish.
    TimerSpent {
        task_id: i64,
        accumulated_ms: i64,
        at: DateTime<Utc>,
    },
    /// A finished session was committed: task completed, subject credited.
    SessionFinished {
        task_id: i64,
        studied_ms: i64,
        at: DateTime<Utc>,
    },
    /// Full timer state, for status queries.
    StateSnapshot {
        state: TimerState,
        task_id: Option<i64>,
        total_ms: i64,
        remaining_ms: i64,
        accumulated_ms: i64,
        at: DateTime<Utc>,
    },
}
