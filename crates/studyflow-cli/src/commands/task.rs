use clap::Subcommand;
use studyflow_core::storage::{SqliteStore, Store};
use studyflow_core::{ledger, score, Clock, SystemClock, Task};

use crate::common::{fmt_duration, parse_deadline, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Subject id (0 = unassigned)
        #[arg(long, default_value = "0")]
        subject: i64,
        /// Priority, 1 (most urgent) to 5
        #[arg(long, default_value = "3")]
        priority: u8,
        /// Deadline: 'YYYY-MM-DD HH:MM', RFC 3339, or +<n>m/h/d
        #[arg(long)]
        due: String,
        /// Planned minutes (0 = default one hour)
        #[arg(long, default_value = "0")]
        duration: u32,
    },
    /// List tasks, best first
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Mark a task complete (books its planned duration)
    Complete {
        /// Task id
        id: i64,
    },
    /// Re-open a completed task (undoes the booking)
    Reopen {
        /// Task id
        id: i64,
    },
    /// Delete a task
    Remove {
        /// Task id
        id: i64,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let store = SqliteStore::open()?;

    match action {
        TaskAction::Add {
            title,
            subject,
            priority,
            due,
            duration,
        } => {
            let task = Task {
                id: 0,
                title,
                subject_id: subject,
                priority,
                deadline: parse_deadline(&due)?,
                is_completed: false,
                duration_minutes: duration,
            };
            task.validate()?;
            let id = store.upsert_task(&task)?;
            println!("Task created: {id}");
        }
        TaskAction::List { json } => {
            let mut tasks = store.list_tasks()?;
            let now = SystemClock.now();
            score::rank(&mut tasks, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for t in &tasks {
                    let mark = if t.is_completed { "x" } else { " " };
                    println!(
                        "[{mark}] #{:<4} p{}  due {}  {}  ({})",
                        t.id,
                        t.priority,
                        t.deadline.format("%Y-%m-%d %H:%M"),
                        t.title,
                        fmt_duration(t.planned_duration_ms()),
                    );
                }
            }
        }
        TaskAction::Complete { id } => {
            ledger::set_task_completed(&store, id, true)?;
            println!("Task {id} completed");
        }
        TaskAction::Reopen { id } => {
            ledger::set_task_completed(&store, id, false)?;
            println!("Task {id} re-opened");
        }
        TaskAction::Remove { id } => {
            store.delete_task(id)?;
            println!("Task {id} deleted");
        }
    }
    Ok(())
}
