//! SQLite-backed record store.
//!
//! Persists the three record collections (tasks, subjects, work sessions)
//! plus a key-value table used to park engine state between CLI
//! invocations. Instants are stored as RFC 3339 text, weekdays as
//! 0=Sun..6=Sat integers.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{CoreError, DatabaseError, Result};
use crate::model::{weekday_from_index, weekday_index, Subject, Task, WorkSession};

use super::{data_dir, migrations, Store};

/// SQLite database holding all persisted records.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/studyflow/studyflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("studyflow.db");
        let conn = Connection::open(&path).map_err(|source| {
            CoreError::Database(DatabaseError::OpenFailed { path, source })
        })?;
        Self::from_connection(conn)
    }

    /// Open a database at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let path = path.into();
        let conn = Connection::open(&path).map_err(|source| {
            CoreError::Database(DatabaseError::OpenFailed { path, source })
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            });
        match value {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn parse_instant(text: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

impl Store for SqliteStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, subject_id, priority, deadline, is_completed, duration_minutes
             FROM tasks ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let deadline: String = row.get(4)?;
            Ok(Task {
                id: row.get(0)?,
                title: row.get(1)?,
                subject_id: row.get(2)?,
                priority: row.get(3)?,
                deadline: parse_instant(&deadline, 4)?,
                is_completed: row.get(5)?,
                duration_minutes: row.get(6)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    fn upsert_task(&self, task: &Task) -> Result<i64> {
        if task.id == 0 {
            self.conn.execute(
                "INSERT INTO tasks (title, subject_id, priority, deadline, is_completed, duration_minutes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    task.title,
                    task.subject_id,
                    task.priority,
                    task.deadline.to_rfc3339(),
                    task.is_completed,
                    task.duration_minutes,
                ],
            )?;
            Ok(self.conn.last_insert_rowid())
        } else {
            self.conn.execute(
                "INSERT OR REPLACE INTO tasks (id, title, subject_id, priority, deadline, is_completed, duration_minutes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    task.id,
                    task.title,
                    task.subject_id,
                    task.priority,
                    task.deadline.to_rfc3339(),
                    task.is_completed,
                    task.duration_minutes,
                ],
            )?;
            Ok(task.id)
        }
    }

    fn delete_task(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn list_subjects(&self) -> Result<Vec<Subject>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, weight, color, goal_time_ms, studied_time_ms, remaining_time_ms, deadline
             FROM subjects ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let deadline: String = row.get(7)?;
            Ok(Subject {
                id: row.get(0)?,
                name: row.get(1)?,
                weight: row.get(2)?,
                color: row.get(3)?,
                goal_time_ms: row.get(4)?,
                studied_time_ms: row.get(5)?,
                remaining_time_ms: row.get(6)?,
                deadline: parse_instant(&deadline, 7)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    fn upsert_subject(&self, subject: &Subject) -> Result<i64> {
        if subject.id == 0 {
            self.conn.execute(
                "INSERT INTO subjects (name, weight, color, goal_time_ms, studied_time_ms, remaining_time_ms, deadline)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    subject.name,
                    subject.weight,
                    subject.color,
                    subject.goal_time_ms,
                    subject.studied_time_ms,
                    subject.remaining_time_ms,
                    subject.deadline.to_rfc3339(),
                ],
            )?;
            Ok(self.conn.last_insert_rowid())
        } else {
            self.conn.execute(
                "INSERT OR REPLACE INTO subjects (id, name, weight, color, goal_time_ms, studied_time_ms, remaining_time_ms, deadline)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    subject.id,
                    subject.name,
                    subject.weight,
                    subject.color,
                    subject.goal_time_ms,
                    subject.studied_time_ms,
                    subject.remaining_time_ms,
                    subject.deadline.to_rfc3339(),
                ],
            )?;
            Ok(subject.id)
        }
    }

    fn delete_subject(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM subjects WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<WorkSession>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, day_of_week, start_ms, end_ms FROM work_sessions ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let day_index: u8 = row.get(1)?;
            let day_of_week = weekday_from_index(day_index).ok_or_else(|| {
                rusqlite::Error::IntegralValueOutOfRange(1, i64::from(day_index))
            })?;
            Ok(WorkSession {
                id: row.get(0)?,
                day_of_week,
                start_ms: row.get(2)?,
                end_ms: row.get(3)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    fn upsert_session(&self, session: &WorkSession) -> Result<i64> {
        let day = weekday_index(session.day_of_week);
        if session.id == 0 {
            self.conn.execute(
                "INSERT INTO work_sessions (day_of_week, start_ms, end_ms) VALUES (?1, ?2, ?3)",
                params![day, session.start_ms, session.end_ms],
            )?;
            Ok(self.conn.last_insert_rowid())
        } else {
            self.conn.execute(
                "INSERT OR REPLACE INTO work_sessions (id, day_of_week, start_ms, end_ms)
                 VALUES (?1, ?2, ?3, ?4)",
                params![session.id, day, session.start_ms, session.end_ms],
            )?;
            Ok(session.id)
        }
    }

    fn delete_session(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM work_sessions WHERE id = ?1", params![id])?;
        Ok(())
    }
}
