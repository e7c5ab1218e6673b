use chrono::{Duration, Utc};
use clap::Subcommand;
use studyflow_core::storage::{SqliteStore, Store};
use studyflow_core::Subject;

use crate::common::{fmt_duration, parse_deadline, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        /// Subject name
        name: String,
        /// Goal study time in hours
        #[arg(long, default_value = "10")]
        goal_hours: f32,
        /// Display color as #RRGGBB
        #[arg(long, default_value = "#4A90D9")]
        color: String,
        /// Deadline (defaults to one week out)
        #[arg(long)]
        due: Option<String>,
        /// Priority weight (persisted, not used by scoring)
        #[arg(long, default_value = "1.0")]
        weight: f32,
    },
    /// List subjects with progress
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete a subject
    Remove {
        /// Subject id
        id: i64,
    },
}

pub fn run(action: SubjectAction) -> CliResult {
    let store = SqliteStore::open()?;

    match action {
        SubjectAction::Add {
            name,
            goal_hours,
            color,
            due,
            weight,
        } => {
            let goal_time_ms = (f64::from(goal_hours) * 3_600_000.0) as i64;
            let deadline = match due {
                Some(text) => parse_deadline(&text)?,
                None => Utc::now() + Duration::weeks(1),
            };
            let subject = Subject {
                id: 0,
                name,
                weight,
                color,
                goal_time_ms,
                studied_time_ms: 0,
                remaining_time_ms: goal_time_ms,
                deadline,
            };
            subject.validate()?;
            let id = store.upsert_subject(&subject)?;
            println!("Subject created: {id}");
        }
        SubjectAction::List { json } => {
            let subjects = store.list_subjects()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&subjects)?);
            } else if subjects.is_empty() {
                println!("No subjects.");
            } else {
                for s in &subjects {
                    println!(
                        "#{:<4} {:<20} studied {} / goal {} (remaining {})",
                        s.id,
                        s.name,
                        fmt_duration(s.studied_time_ms),
                        fmt_duration(s.goal_time_ms),
                        fmt_duration(s.remaining_time_ms),
                    );
                }
            }
        }
        SubjectAction::Remove { id } => {
            store.delete_subject(id)?;
            println!("Subject {id} deleted");
        }
    }
    Ok(())
}
