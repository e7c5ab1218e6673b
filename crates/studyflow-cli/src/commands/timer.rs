use clap::Subcommand;
use studyflow_core::storage::{Config, SqliteStore, Store};
use studyflow_core::{timer, Event, StudyTimer};

use crate::common::{fmt_duration, CliResult};

const TIMER_KEY: &str = "study_timer";

#[derive(Subcommand)]
pub enum TimerAction {
    /// Bind a task and start the countdown
    Start {
        /// Task id
        task_id: i64,
    },
    /// Pause or resume the countdown
    Toggle,
    /// Print current timer state as JSON
    Status,
    /// Tick the countdown in the foreground until spent or interrupted
    Run,
    /// End the session: complete the task and credit its subject
    Finish,
    /// Abandon the session, discarding unlogged time
    Cancel,
}

fn load_timer(store: &SqliteStore) -> StudyTimer {
    if let Ok(Some(json)) = store.kv_get(TIMER_KEY) {
        if let Ok(timer) = serde_json::from_str::<StudyTimer>(&json) {
            return timer;
        }
    }
    StudyTimer::new()
}

fn save_timer(store: &SqliteStore, timer: &StudyTimer) -> CliResult {
    let json = serde_json::to_string(timer)?;
    store.kv_set(TIMER_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let store = SqliteStore::open()?;
    let mut session = load_timer(&store);

    match action {
        TimerAction::Start { task_id } => {
            let mut task = store
                .list_tasks()?
                .into_iter()
                .find(|t| t.id == task_id)
                .ok_or_else(|| format!("task {task_id} not found"))?;
            if task.duration_minutes == 0 {
                task.duration_minutes = Config::load()?.timer.default_focus_minutes;
            }
            print_event(&session.load(&task)?)?;
            if let Some(event) = session.toggle() {
                print_event(&event)?;
            }
            save_timer(&store, &session)?;
        }
        TimerAction::Toggle => {
            match session.toggle() {
                Some(event) => print_event(&event)?,
                None => print_event(&session.snapshot())?,
            }
            save_timer(&store, &session)?;
        }
        TimerAction::Status => {
            print_event(&session.snapshot())?;
        }
        TimerAction::Run => {
            if !session.is_running() {
                match session.toggle() {
                    Some(event) => print_event(&event)?,
                    None => {
                        print_event(&session.snapshot())?;
                        return Err("no session to run (use 'timer start <task-id>')".into());
                    }
                }
            }
            let tick_secs = Config::load()?.timer.tick_secs.max(1);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let mut interval =
                    tokio::time::interval(std::time::Duration::from_secs(tick_secs));
                interval.tick().await; // first tick fires immediately
                while session.is_running() {
                    interval.tick().await;
                    if let Some(event) = session.tick() {
                        let _ = print_event(&event);
                    }
                    let _ = save_timer(&store, &session);
                }
            });
            if session.is_spent() {
                println!(
                    "Countdown spent after {} -- run 'studyflow timer finish' to log it",
                    fmt_duration(session.accumulated_ms()),
                );
            } else {
                println!(
                    "Countdown stopped after {}",
                    fmt_duration(session.accumulated_ms()),
                );
            }
        }
        TimerAction::Finish => {
            let summary = session
                .finish()
                .ok_or("no session to finish (use 'timer start <task-id>')")?;
            let event = timer::commit_session(&store, summary)?;
            print_event(&event)?;
            store.kv_delete(TIMER_KEY)?;
        }
        TimerAction::Cancel => {
            if session.task_id().is_some() {
                println!(
                    "Session abandoned; {} discarded",
                    fmt_duration(session.accumulated_ms()),
                );
            } else {
                println!("No session to cancel");
            }
            store.kv_delete(TIMER_KEY)?;
        }
    }
    Ok(())
}
