use chrono::Weekday;
use clap::Subcommand;
use studyflow_core::storage::{Config, SqliteStore, Store};
use studyflow_core::{notify, NotificationScheduler, WorkSession};

use crate::common::{fmt_time_of_day, parse_time_of_day, parse_weekday, CliResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Add a weekly work session
    Add {
        /// Day of week (mon..sun)
        day: String,
        /// Window start, HH:MM
        start: String,
        /// Window end, HH:MM
        end: String,
    },
    /// List work sessions
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete a work session
    Remove {
        /// Session id
        id: i64,
    },
}

/// Reminder sink for a terminal frontend: announces the registration and
/// leaves OS delivery to whatever wraps the CLI.
struct StdoutScheduler;

impl NotificationScheduler for StdoutScheduler {
    fn schedule_weekly(&self, day: Weekday, hour: u32, minute: u32) {
        println!("Reminder scheduled: every {day} at {hour:02}:{minute:02}");
    }
}

pub fn run(action: SessionAction) -> CliResult {
    let store = SqliteStore::open()?;

    match action {
        SessionAction::Add { day, start, end } => {
            let session = WorkSession {
                id: 0,
                day_of_week: parse_weekday(&day)?,
                start_ms: parse_time_of_day(&start)?,
                end_ms: parse_time_of_day(&end)?,
            };
            session.validate()?;
            let id = store.upsert_session(&session)?;
            println!("Session created: {id}");

            if Config::load()?.notifications.enabled {
                notify::schedule_session(&StdoutScheduler, &session);
            }
        }
        SessionAction::List { json } => {
            let sessions = store.list_sessions()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else if sessions.is_empty() {
                println!("No work sessions.");
            } else {
                for s in &sessions {
                    println!(
                        "#{:<4} {:<9} {} - {}",
                        s.id,
                        s.day_of_week.to_string(),
                        fmt_time_of_day(s.start_ms),
                        fmt_time_of_day(s.end_ms),
                    );
                }
            }
        }
        SessionAction::Remove { id } => {
            store.delete_session(id)?;
            println!("Session {id} deleted");
        }
    }
    Ok(())
}
