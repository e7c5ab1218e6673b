//! Persistence: SQLite record store and TOML configuration.

mod config;
pub mod database;
pub mod migrations;

pub use config::Config;
pub use database::SqliteStore;

use std::path::PathBuf;

use crate::error::Result;
use crate::model::{Subject, Task, WorkSession};

/// The narrow persistence interface the engine is written against.
///
/// Reads return point-in-time snapshots in id order; writes are
/// fire-and-forget from the engine's perspective. No transaction spans a
/// Task+Subject pair -- a failed write surfaces on that write alone and the
/// other record keeps its last committed value.
pub trait Store {
    fn list_tasks(&self) -> Result<Vec<Task>>;
    /// Insert (id 0) or replace (id > 0). Returns the record's id.
    fn upsert_task(&self, task: &Task) -> Result<i64>;
    fn delete_task(&self, id: i64) -> Result<()>;

    fn list_subjects(&self) -> Result<Vec<Subject>>;
    fn upsert_subject(&self, subject: &Subject) -> Result<i64>;
    fn delete_subject(&self, id: i64) -> Result<()>;

    fn list_sessions(&self) -> Result<Vec<WorkSession>>;
    fn upsert_session(&self, session: &WorkSession) -> Result<i64>;
    fn delete_session(&self, id: i64) -> Result<()>;
}

/// Returns `~/.config/studyflow[-dev]/` based on STUDYFLOW_ENV.
///
/// Set STUDYFLOW_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYFLOW_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studyflow-dev")
    } else {
        base_dir.join("studyflow")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
