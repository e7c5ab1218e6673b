//! Value types for tasks, subjects, and weekly work sessions.
//!
//! These are the persisted records the engine operates on. The engine only
//! ever borrows point-in-time snapshots; ownership stays with the store.
//! Input contracts (non-empty titles, priority range, session windows) are
//! enforced here via `validate()` so the scoring, resolver, and ledger code
//! can stay total.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Milliseconds in one day; session times live in `[0, MILLIS_PER_DAY)`.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Default planned duration when a task leaves `duration_minutes` unset: one hour.
pub const DEFAULT_TASK_DURATION_MS: i64 = 3_600_000;

/// A user-defined unit of work with priority and deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store on creation; 0 means "not yet persisted".
    pub id: i64,
    pub title: String,
    /// References a [`Subject`]; 0 = unassigned.
    pub subject_id: i64,
    /// 1 = most urgent, 5 = least.
    pub priority: u8,
    pub deadline: DateTime<Utc>,
    pub is_completed: bool,
    /// Planned minutes; 0 = unset, defaults to one hour at scheduling time.
    pub duration_minutes: u32,
}

impl Task {
    /// Check the input contract. Called at the form/CLI boundary, never by
    /// the scorer.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !(1..=5).contains(&self.priority) {
            return Err(ValidationError::PriorityOutOfRange(self.priority));
        }
        Ok(())
    }

    /// Planned duration in milliseconds, with the one-hour default applied.
    pub fn planned_duration_ms(&self) -> i64 {
        if self.duration_minutes > 0 {
            i64::from(self.duration_minutes) * 60_000
        } else {
            DEFAULT_TASK_DURATION_MS
        }
    }
}

/// A category accumulating study-time progress toward a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// Persisted weight; not consulted by the scoring algorithm.
    pub weight: f32,
    /// Display color as `#RRGGBB`.
    pub color: String,
    /// Target focus duration in milliseconds.
    pub goal_time_ms: i64,
    /// Cumulative focus duration in milliseconds; never negative.
    pub studied_time_ms: i64,
    /// Derived: `max(goal_time_ms - studied_time_ms, 0)`. The ledger keeps
    /// this in step with every update.
    pub remaining_time_ms: i64,
    pub deadline: DateTime<Utc>,
}

impl Subject {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name",
                message: "must not be empty".into(),
            });
        }
        if self.goal_time_ms < 0 {
            return Err(ValidationError::InvalidValue {
                field: "goal_time_ms",
                message: format!("must be >= 0, got {}", self.goal_time_ms),
            });
        }
        validate_color(&self.color)?;
        Ok(())
    }
}

/// A recurring weekly availability window, not a one-off event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: i64,
    pub day_of_week: Weekday,
    /// Milliseconds since local midnight, in `[0, MILLIS_PER_DAY)`.
    pub start_ms: i64,
    /// Milliseconds since local midnight; must be greater than `start_ms`.
    pub end_ms: i64,
}

impl WorkSession {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for t in [self.start_ms, self.end_ms] {
            if !(0..MILLIS_PER_DAY).contains(&t) {
                return Err(ValidationError::InvalidTimeOfDay(t));
            }
        }
        if self.start_ms >= self.end_ms {
            return Err(ValidationError::InvalidTimeRange {
                start: self.start_ms,
                end: self.end_ms,
            });
        }
        Ok(())
    }

    /// Local start hour of the window, for notification scheduling.
    pub fn start_hour(&self) -> u32 {
        (self.start_ms / 3_600_000) as u32
    }

    /// Minute-of-hour of the window start.
    pub fn start_minute(&self) -> u32 {
        (self.start_ms % 3_600_000 / 60_000) as u32
    }
}

/// Weekday -> storage index, 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Storage index -> weekday; inverse of [`weekday_index`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

fn validate_color(color: &str) -> Result<(), ValidationError> {
    let ok = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidColor(color.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task() -> Task {
        Task {
            id: 1,
            title: "Read chapter 4".into(),
            subject_id: 0,
            priority: 3,
            deadline: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap(),
            is_completed: false,
            duration_minutes: 0,
        }
    }

    #[test]
    fn task_validation_rejects_bad_priority() {
        let mut t = task();
        t.priority = 0;
        assert!(matches!(
            t.validate(),
            Err(ValidationError::PriorityOutOfRange(0))
        ));
        t.priority = 6;
        assert!(t.validate().is_err());
        t.priority = 5;
        assert!(t.validate().is_ok());
    }

    #[test]
    fn task_validation_rejects_empty_title() {
        let mut t = task();
        t.title = "   ".into();
        assert!(matches!(t.validate(), Err(ValidationError::EmptyTitle)));
    }

    #[test]
    fn unset_duration_defaults_to_one_hour() {
        assert_eq!(task().planned_duration_ms(), 3_600_000);
        let mut t = task();
        t.duration_minutes = 25;
        assert_eq!(t.planned_duration_ms(), 1_500_000);
    }

    #[test]
    fn session_window_must_be_ordered_and_in_range() {
        let mut s = WorkSession {
            id: 1,
            day_of_week: Weekday::Mon,
            start_ms: 32_400_000,
            end_ms: 36_000_000,
        };
        assert!(s.validate().is_ok());

        s.end_ms = s.start_ms;
        assert!(matches!(
            s.validate(),
            Err(ValidationError::InvalidTimeRange { .. })
        ));

        s.end_ms = MILLIS_PER_DAY;
        assert!(matches!(
            s.validate(),
            Err(ValidationError::InvalidTimeOfDay(_))
        ));
    }

    #[test]
    fn session_start_hour_minute() {
        let s = WorkSession {
            id: 1,
            day_of_week: Weekday::Fri,
            start_ms: 9 * 3_600_000 + 30 * 60_000,
            end_ms: 11 * 3_600_000,
        };
        assert_eq!(s.start_hour(), 9);
        assert_eq!(s.start_minute(), 30);
    }

    #[test]
    fn weekday_index_round_trip() {
        for i in 0..7u8 {
            assert_eq!(weekday_index(weekday_from_index(i).unwrap()), i);
        }
        assert!(weekday_from_index(7).is_none());
    }

    #[test]
    fn color_validation() {
        let mut subject = Subject {
            id: 1,
            name: "Physics".into(),
            weight: 1.0,
            color: "#FF8800".into(),
            goal_time_ms: 3_600_000,
            studied_time_ms: 0,
            remaining_time_ms: 3_600_000,
            deadline: Utc.with_ymd_and_hms(2026, 9, 8, 0, 0, 0).unwrap(),
        };
        assert!(subject.validate().is_ok());
        subject.color = "FF8800".into();
        assert!(matches!(
            subject.validate(),
            Err(ValidationError::InvalidColor(_))
        ));
        subject.color = "#GGGGGG".into();
        assert!(subject.validate().is_err());
    }
}
