//! Progress accounting.
//!
//! Converts elapsed focus time into a subject's cumulative totals. The
//! arithmetic is pure and clamped: `studied_time_ms` never drops below
//! zero (large negative deltas from un-completing tasks bottom out), and
//! `remaining_time_ms` is always re-derived as `max(goal - studied, 0)`.

use crate::error::{CoreError, Result};
use crate::model::{Subject, Task};
use crate::storage::Store;

/// Apply a signed focus-time delta to a subject.
///
/// Positive deltas commit study time; negative deltas undo it (e.g. when a
/// task is un-completed). Total for every input; the caller owns the delta.
pub fn apply(subject: &Subject, delta_ms: i64) -> Subject {
    let studied = (subject.studied_time_ms + delta_ms).max(0);
    let remaining = (subject.goal_time_ms - studied).max(0);
    Subject {
        studied_time_ms: studied,
        remaining_time_ms: remaining,
        ..subject.clone()
    }
}

/// Flip a task's completion flag and book its planned duration against the
/// subject: `+planned` on complete, `-planned` on un-complete.
///
/// The two writes are not atomic; an error from either leaves the other
/// record at its last committed value. A task without a subject (or whose
/// subject has been deleted) skips the ledger step entirely.
pub fn set_task_completed(store: &dyn Store, task_id: i64, completed: bool) -> Result<()> {
    let task = store
        .list_tasks()?
        .into_iter()
        .find(|t| t.id == task_id)
        .ok_or(CoreError::NotFound {
            kind: "task",
            id: task_id,
        })?;

    if task.is_completed == completed {
        return Ok(());
    }

    let updated = Task {
        is_completed: completed,
        ..task.clone()
    };
    store.upsert_task(&updated)?;

    if task.subject_id != 0 {
        if let Some(subject) = store
            .list_subjects()?
            .into_iter()
            .find(|s| s.id == task.subject_id)
        {
            let delta = if completed {
                task.planned_duration_ms()
            } else {
                -task.planned_duration_ms()
            };
            store.upsert_subject(&apply(&subject, delta))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn subject(goal: i64, studied: i64) -> Subject {
        Subject {
            id: 1,
            name: "Maths".into(),
            weight: 1.0,
            color: "#3366FF".into(),
            goal_time_ms: goal,
            studied_time_ms: studied,
            remaining_time_ms: (goal - studied).max(0),
            deadline: Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn positive_delta_moves_both_totals() {
        let s = apply(&subject(3_600_000, 0), 600_000);
        assert_eq!(s.studied_time_ms, 600_000);
        assert_eq!(s.remaining_time_ms, 3_000_000);
    }

    #[test]
    fn overshoot_clamps_remaining_at_zero() {
        let s = apply(&subject(1_000_000, 900_000), 500_000);
        assert_eq!(s.studied_time_ms, 1_400_000);
        assert_eq!(s.remaining_time_ms, 0);
    }

    #[test]
    fn large_negative_delta_clamps_studied_at_zero() {
        let s = apply(&subject(3_600_000, 600_000), -i64::MAX / 2);
        assert_eq!(s.studied_time_ms, 0);
        assert_eq!(s.remaining_time_ms, 3_600_000);
    }

    #[test]
    fn round_trip_holds_above_the_clamp() {
        let start = subject(3_600_000, 1_200_000);
        let back = apply(&apply(&start, 600_000), -600_000);
        assert_eq!(back, start);
    }

    #[test]
    fn round_trip_fails_at_the_clamp_boundary() {
        // studied < delta, so the undo bottoms out at zero rather than
        // going negative; equality with the original is lost.
        let start = subject(3_600_000, 200_000);
        let back = apply(&apply(&start, -600_000), 600_000);
        assert_ne!(back, start);
        assert_eq!(back.studied_time_ms, 600_000);
    }

    proptest! {
        #[test]
        fn totals_never_go_negative(
            goal in 0i64..10_000_000_000,
            studied in 0i64..10_000_000_000,
            delta in -10_000_000_000i64..10_000_000_000,
        ) {
            let s = apply(&subject(goal, studied), delta);
            prop_assert!(s.studied_time_ms >= 0);
            prop_assert!(s.remaining_time_ms >= 0);
            prop_assert_eq!(
                s.remaining_time_ms,
                (s.goal_time_ms - s.studied_time_ms).max(0)
            );
        }
    }

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_memory().unwrap();
        store.upsert_subject(&subject(3_600_000, 0)).unwrap();
        store
            .upsert_task(&Task {
                id: 0,
                title: "Flashcards".into(),
                subject_id: 1,
                priority: 2,
                deadline: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
                is_completed: false,
                duration_minutes: 30,
            })
            .unwrap();
        store
    }

    #[test]
    fn completing_a_task_books_its_planned_duration() {
        let store = seeded_store();
        set_task_completed(&store, 1, true).unwrap();

        let task = &store.list_tasks().unwrap()[0];
        assert!(task.is_completed);
        let s = &store.list_subjects().unwrap()[0];
        assert_eq!(s.studied_time_ms, 1_800_000);
        assert_eq!(s.remaining_time_ms, 1_800_000);
    }

    #[test]
    fn uncompleting_undoes_the_booking() {
        let store = seeded_store();
        set_task_completed(&store, 1, true).unwrap();
        set_task_completed(&store, 1, false).unwrap();

        let s = &store.list_subjects().unwrap()[0];
        assert_eq!(s.studied_time_ms, 0);
        assert_eq!(s.remaining_time_ms, 3_600_000);
    }

    #[test]
    fn toggle_is_idempotent_per_direction() {
        let store = seeded_store();
        set_task_completed(&store, 1, true).unwrap();
        set_task_completed(&store, 1, true).unwrap();
        let s = &store.list_subjects().unwrap()[0];
        assert_eq!(s.studied_time_ms, 1_800_000);
    }

    #[test]
    fn missing_subject_skips_the_ledger() {
        let store = seeded_store();
        store.delete_subject(1).unwrap();
        set_task_completed(&store, 1, true).unwrap();
        assert!(store.list_tasks().unwrap()[0].is_completed);
    }

    #[test]
    fn missing_task_is_an_error() {
        let store = seeded_store();
        assert!(matches!(
            set_task_completed(&store, 99, true),
            Err(CoreError::NotFound { kind: "task", .. })
        ));
    }
}
