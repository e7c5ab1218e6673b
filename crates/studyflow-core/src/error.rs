//! Core error types for studyflow-core.
//!
//! This module defines the error hierarchy using thiserror. Numeric edge
//! cases (overdue deadlines, depleted study budgets) are handled by clamps
//! in the scoring and ledger code and never surface here; these variants
//! cover the input boundary and the persistence layer.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors, raised at the input boundary only.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task title must be non-empty
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Priority must be within [1, 5]
    #[error("Priority {0} is out of range (expected 1-5, 1 = most urgent)")]
    PriorityOutOfRange(u8),

    /// Time-of-day must be within [0, 86_400_000)
    #[error("Time of day {0} ms is outside a single day")]
    InvalidTimeOfDay(i64),

    /// Session window must satisfy start < end
    #[error("Invalid session window: start ({start} ms) must be before end ({end} ms)")]
    InvalidTimeRange { start: i64, end: i64 },

    /// Display color must be a #RRGGBB hex string
    #[error("Invalid color '{0}' (expected #RRGGBB)")]
    InvalidColor(String),

    /// Negative duration for a goal or study total
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(DatabaseError::from(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
