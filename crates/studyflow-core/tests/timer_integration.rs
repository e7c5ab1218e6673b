//! Full focus-session lifecycle against a real SQLite store.

use chrono::{Duration, TimeZone, Utc};
use studyflow_core::{timer, SqliteStore, Store, StudyTimer, Subject, Task, TimerState};

fn now() -> chrono::DateTime<chrono::Utc> {
    Utc.with_ymd_and_hms(2026, 8, 24, 19, 0, 0).unwrap()
}

fn seeded() -> (SqliteStore, Task) {
    let store = SqliteStore::open_memory().unwrap();
    store
        .upsert_subject(&Subject {
            id: 0,
            name: "French".into(),
            weight: 1.0,
            color: "#4455EE".into(),
            goal_time_ms: 3_600_000,
            studied_time_ms: 0,
            remaining_time_ms: 3_600_000,
            deadline: now() + Duration::days(7),
        })
        .unwrap();
    let mut task = Task {
        id: 0,
        title: "Vocabulary drill".into(),
        subject_id: 1,
        priority: 2,
        deadline: now() + Duration::days(1),
        is_completed: false,
        duration_minutes: 20,
    };
    task.id = store.upsert_task(&task).unwrap();
    (store, task)
}

#[test]
fn run_pause_finish_commits_exactly_the_ticked_time() {
    let (store, task) = seeded();

    let mut timer = StudyTimer::new();
    timer.load(&task).unwrap();
    timer.toggle();
    for _ in 0..600 {
        timer.tick();
    }
    timer.toggle(); // pause keeps the accumulator
    assert_eq!(timer.accumulated_ms(), 600_000);
    timer.toggle();
    for _ in 0..60 {
        timer.tick();
    }

    let summary = timer.finish().unwrap();
    timer::commit_session(&store, summary).unwrap();

    let stored_task = &store.list_tasks().unwrap()[0];
    assert!(stored_task.is_completed);
    let subject = &store.list_subjects().unwrap()[0];
    assert_eq!(subject.studied_time_ms, 660_000);
    assert_eq!(subject.remaining_time_ms, 3_600_000 - 660_000);
}

#[test]
fn abandoning_a_session_commits_nothing() {
    let (store, task) = seeded();

    {
        let mut timer = StudyTimer::new();
        timer.load(&task).unwrap();
        timer.toggle();
        for _ in 0..120 {
            timer.tick();
        }
        // Dropped without finish(): the accumulated two minutes are gone.
    }

    assert!(!store.list_tasks().unwrap()[0].is_completed);
    assert_eq!(store.list_subjects().unwrap()[0].studied_time_ms, 0);
}

#[test]
fn spent_timer_still_needs_an_explicit_finish() {
    let (store, task) = seeded();

    let mut timer = StudyTimer::new();
    timer.load(&task).unwrap();
    timer.toggle();
    for _ in 0..20 * 60 {
        timer.tick();
    }
    assert!(timer.is_spent());
    assert_eq!(timer.state(), TimerState::Paused);
    // Nothing written yet.
    assert!(!store.list_tasks().unwrap()[0].is_completed);

    let summary = timer.finish().unwrap();
    assert_eq!(summary.studied_ms, 20 * 60_000);
    timer::commit_session(&store, summary).unwrap();
    assert!(store.list_tasks().unwrap()[0].is_completed);
}

#[test]
fn parked_timer_resumes_across_a_store_round_trip() {
    let (store, task) = seeded();

    let mut timer = StudyTimer::new();
    timer.load(&task).unwrap();
    timer.toggle();
    for _ in 0..30 {
        timer.tick();
    }

    // Park in the kv table the way the CLI does between invocations.
    store
        .kv_set("study_timer", &serde_json::to_string(&timer).unwrap())
        .unwrap();
    let json = store.kv_get("study_timer").unwrap().unwrap();
    let mut restored: StudyTimer = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.accumulated_ms(), 30_000);
    for _ in 0..30 {
        restored.tick();
    }
    let summary = restored.finish().unwrap();
    timer::commit_session(&store, summary).unwrap();
    assert_eq!(store.list_subjects().unwrap()[0].studied_time_ms, 60_000);
}

#[test]
fn session_overshooting_the_goal_clamps_remaining() {
    let (store, mut task) = seeded();
    task.duration_minutes = 120; // longer than the one-hour goal
    store.upsert_task(&task).unwrap();

    let mut timer = StudyTimer::new();
    timer.load(&task).unwrap();
    timer.toggle();
    for _ in 0..120 * 60 {
        timer.tick();
    }
    timer::commit_session(&store, timer.finish().unwrap()).unwrap();

    let subject = &store.list_subjects().unwrap()[0];
    assert_eq!(subject.studied_time_ms, 7_200_000);
    assert_eq!(subject.remaining_time_ms, 0);
}
