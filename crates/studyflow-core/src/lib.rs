//! # Studyflow Core Library
//!
//! Core business logic for Studyflow, a study planner that answers one
//! question at any moment: is it time to study, and if so, what. The CLI
//! binary is a thin layer over this library; a GUI would sit on the same
//! surface.
//!
//! ## Architecture
//!
//! - **Scoring**: a pure deadline-urgency-plus-priority rank over tasks
//! - **Resolver**: maps the local wall clock onto weekly availability windows
//! - **Recommendation engine**: folds both into an atomically-replaced snapshot
//! - **Study timer**: a caller-ticked countdown state machine bound to one task
//! - **Ledger**: clamped accounting of focus time into per-subject totals
//! - **Storage**: SQLite record store and TOML configuration
//!
//! ## Key components
//!
//! - [`StudyTimer`]: countdown session state machine
//! - [`RecommendationEngine`]: holder of the latest [`Recommendation`]
//! - [`Store`]: narrow persistence interface (SQLite implementation included)
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod ledger;
pub mod model;
pub mod notify;
pub mod recommend;
pub mod resolver;
pub mod score;
pub mod storage;
pub mod timer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, DatabaseError, Result, ValidationError};
pub use events::Event;
pub use model::{Subject, Task, WorkSession};
pub use notify::NotificationScheduler;
pub use recommend::{Recommendation, RecommendationEngine, REFRESH_INTERVAL_SECS};
pub use storage::{Config, SqliteStore, Store};
pub use timer::{SessionSummary, StudyTimer, TimerState};
