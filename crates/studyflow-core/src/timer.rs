//! Study timer state machine.
//!
//! A per-focus-session countdown bound to exactly one task. The machine has
//! no internal threads: the caller drives it with a one-second `tick()`
//! cadence and stops ticking whenever a command cancels the session. The
//! struct serializes with serde so a CLI invocation can park it between
//! commands.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Ready -> Running <-> Paused
//!                     |            |
//!                     +-- finish --+--> Finished (terminal)
//! ```
//!
//! A spent countdown (remaining at zero) drops back to `Paused` and waits:
//! logging the accumulated time always takes an explicit `finish()`.
//! Dropping the timer without finishing discards the accumulated time.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::ledger;
use crate::model::Task;
use crate::storage::Store;

/// Milliseconds deducted per tick; the caller ticks once a second.
pub const TICK_MS: i64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Ready,
    Running,
    Paused,
    Finished,
}

/// What a finished session owes the store: one completed task and, when the
/// task has a subject, a positive ledger delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub task_id: i64,
    pub studied_ms: i64,
}

/// Countdown session bound to one task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyTimer {
    state: TimerState,
    task_id: Option<i64>,
    total_ms: i64,
    remaining_ms: i64,
    accumulated_ms: i64,
}

impl Default for StudyTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl StudyTimer {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            task_id: None,
            total_ms: 0,
            remaining_ms: 0,
            accumulated_ms: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn task_id(&self) -> Option<i64> {
        self.task_id
    }

    pub fn total_ms(&self) -> i64 {
        self.total_ms
    }

    pub fn remaining_ms(&self) -> i64 {
        self.remaining_ms
    }

    pub fn accumulated_ms(&self) -> i64 {
        self.accumulated_ms
    }

    /// Whether the caller should keep the one-second cadence going.
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Countdown reached zero but the session awaits an explicit finish.
    pub fn is_spent(&self) -> bool {
        self.task_id.is_some() && self.remaining_ms == 0 && self.state == TimerState::Paused
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            task_id: self.task_id,
            total_ms: self.total_ms,
            remaining_ms: self.remaining_ms,
            accumulated_ms: self.accumulated_ms,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Bind a task and restore the full duration. Only valid from `Idle`;
    /// a timer already bound to a session refuses a second task.
    pub fn load(&mut self, task: &Task) -> Result<Event> {
        if self.state != TimerState::Idle {
            return Err(CoreError::Custom(
                "timer already has a session in progress".into(),
            ));
        }
        self.task_id = Some(task.id);
        self.total_ms = task.planned_duration_ms();
        self.remaining_ms = self.total_ms;
        self.accumulated_ms = 0;
        self.state = TimerState::Ready;
        Ok(Event::TimerLoaded {
            task_id: task.id,
            total_ms: self.total_ms,
            at: Utc::now(),
        })
    }

    /// Flip between running and paused. `Ready` starts the cadence; a spent
    /// timer stays paused (nothing left to count down).
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Ready => {
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    task_id: self.task_id?,
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_ms: self.remaining_ms,
                    accumulated_ms: self.accumulated_ms,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => {
                if self.remaining_ms == 0 {
                    return None;
                }
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    remaining_ms: self.remaining_ms,
                    at: Utc::now(),
                })
            }
            TimerState::Idle | TimerState::Finished => None,
        }
    }

    /// One second of focus. Deducts from the countdown and credits the
    /// accumulator; at zero remaining the cadence stops without finishing.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_ms = (self.remaining_ms - TICK_MS).max(0);
        self.accumulated_ms += TICK_MS;
        if self.remaining_ms == 0 {
            self.state = TimerState::Paused;
            return Some(Event::TimerSpent {
                task_id: self.task_id?,
                accumulated_ms: self.accumulated_ms,
                at: Utc::now(),
            });
        }
        None
    }

    /// End the session. Cancels the cadence, hands back what was studied,
    /// and resets the accumulator. Terminal; the summary is the only thing
    /// a finished timer is still good for.
    pub fn finish(&mut self) -> Option<SessionSummary> {
        let task_id = self.task_id?;
        if self.state == TimerState::Idle || self.state == TimerState::Finished {
            return None;
        }
        let summary = SessionSummary {
            task_id,
            studied_ms: self.accumulated_ms,
        };
        self.accumulated_ms = 0;
        self.state = TimerState::Finished;
        Some(summary)
    }
}

/// Commit a finished session: mark the task complete and, when it belongs
/// to a subject and any time accrued, credit the subject through the
/// ledger.
///
/// The two writes are not atomic: a failed subject write leaves the task
/// already completed. Time studied against a subject-less task is
/// discarded, not banked anywhere.
pub fn commit_session(store: &dyn Store, summary: SessionSummary) -> Result<Event> {
    let task = store
        .list_tasks()?
        .into_iter()
        .find(|t| t.id == summary.task_id)
        .ok_or(CoreError::NotFound {
            kind: "task",
            id: summary.task_id,
        })?;

    store.upsert_task(&Task {
        is_completed: true,
        ..task.clone()
    })?;

    if task.subject_id != 0 && summary.studied_ms > 0 {
        if let Some(subject) = store
            .list_subjects()?
            .into_iter()
            .find(|s| s.id == task.subject_id)
        {
            store.upsert_subject(&ledger::apply(&subject, summary.studied_ms))?;
        }
    }

    Ok(Event::SessionFinished {
        task_id: summary.task_id,
        studied_ms: summary.studied_ms,
        at: Utc::now(),
    })
}
