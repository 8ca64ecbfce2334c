//! Domain data model: recurring schedules, per-date exceptions, one-off
//! slots, and the ephemeral occurrence projection produced by expansion.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{self, DayOfWeek};
use crate::error::{ScheduleError, ScheduleResult};

/// A weekly-repeating session template bounded by an optional date range.
///
/// `start_time`/`end_time` are stored as full timestamps; only their UTC
/// time-of-day is meaningful (see the crate-level convention).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringSchedule {
    pub id: Uuid,
    pub teacher_id: Uuid,
    /// First date the schedule can produce an occurrence.
    pub start_date: NaiveDate,
    /// Last date the schedule can produce an occurrence; `None` means
    /// unbounded.
    pub end_date: Option<NaiveDate>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Weekday membership. Non-empty, no duplicates.
    pub days: Vec<DayOfWeek>,
    pub max_students: u32,
    /// Overrides keyed by date, at most one per date.
    pub exceptions: Vec<RecurringException>,
    /// Which students attend on which weekday. Read-only input to
    /// expansion; maintained elsewhere.
    pub day_assignments: Vec<DayAssignment>,
}

impl RecurringSchedule {
    /// Time-of-day of the base start time, minutes since midnight.
    #[must_use]
    pub fn start_minutes(&self) -> u32 {
        calendar::time_of_day_minutes(self.start_time)
    }

    /// Time-of-day of the base end time, minutes since midnight.
    #[must_use]
    pub fn end_minutes(&self) -> u32 {
        calendar::time_of_day_minutes(self.end_time)
    }

    /// Students assigned on the given weekday; empty when none are.
    #[must_use]
    pub fn students_on(&self, day: DayOfWeek) -> Vec<Uuid> {
        self.day_assignments
            .iter()
            .find(|assignment| assignment.day == day)
            .map(|assignment| assignment.student_ids.clone())
            .unwrap_or_default()
    }

    /// ## Summary
    /// Checks the model invariants: non-empty duplicate-free `days`,
    /// end time-of-day after start time-of-day, and `end_date` (when
    /// present) not before `start_date`.
    ///
    /// ## Errors
    /// Returns `ScheduleError::ValidationError` naming the violated
    /// invariant.
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.days.is_empty() {
            return Err(ScheduleError::ValidationError(
                "schedule must repeat on at least one weekday".to_string(),
            ));
        }
        for (i, day) in self.days.iter().enumerate() {
            if self.days[..i].contains(day) {
                return Err(ScheduleError::ValidationError(format!(
                    "duplicate weekday {day}"
                )));
            }
        }
        if self.end_minutes() <= self.start_minutes() {
            return Err(ScheduleError::ValidationError(
                "end time must be after start time".to_string(),
            ));
        }
        if let Some(end_date) = self.end_date
            && end_date < self.start_date
        {
            return Err(ScheduleError::ValidationError(
                "end date must not be before start date".to_string(),
            ));
        }
        Ok(())
    }
}

/// An override for a single calendar date of one recurring schedule.
///
/// Both times present means "moved to these times"; both absent means
/// "this date's session does not occur". A mixed state is invalid and
/// never constructed by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringException {
    pub recurring_schedule_id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl RecurringException {
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    /// Override times when both are present.
    #[must_use]
    pub fn override_times(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Students assigned to a schedule on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub day: DayOfWeek,
    pub student_ids: Vec<Uuid>,
}

/// A non-recurring session, stored directly and merged into the week
/// view by composition rather than produced by expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOffSlot {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub max_students: u32,
    pub student_ids: Vec<Uuid>,
}

/// Value-type composite identity of one displayed occurrence of a
/// recurring schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub schedule_id: Uuid,
    pub date: NaiveDate,
}

/// Where an occurrence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceSource {
    Recurring(Uuid),
    OneOff(Uuid),
}

/// One concrete session instance on one concrete date.
///
/// Derived and ephemeral: computed fresh on every expansion, never
/// persisted, and discarded whenever the underlying schedules,
/// exceptions, or target week change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Occurrence {
    pub source: OccurrenceSource,
    pub date: NaiveDate,
    pub day: DayOfWeek,
    /// Effective start, minutes since midnight.
    pub start_minutes: u32,
    /// Effective end, minutes since midnight.
    pub end_minutes: u32,
    /// Effective start as a zero-padded `"HH:MM"` string.
    pub start_time: String,
    /// Effective end as a zero-padded `"HH:MM"` string.
    pub end_time: String,
    pub max_students: u32,
    pub student_ids: Vec<Uuid>,
}

impl Occurrence {
    /// Composite identity when this occurrence belongs to a recurring
    /// schedule; `None` for one-off slots.
    #[must_use]
    pub const fn slot_key(&self) -> Option<SlotKey> {
        match self.source {
            OccurrenceSource::Recurring(schedule_id) => Some(SlotKey {
                schedule_id,
                date: self.date,
            }),
            OccurrenceSource::OneOff(_) => None,
        }
    }
}

/// A validated wall-clock time range within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_minutes: u32,
    pub end_minutes: u32,
}

impl TimeRange {
    /// ## Summary
    /// Parses and validates a `"HH:MM"` pair. Both times share the same
    /// day, so ordering on minutes is equivalent to lexicographic
    /// ordering on the zero-padded strings.
    ///
    /// ## Errors
    /// Returns `ScheduleError::ValidationError` if either string is
    /// malformed or the start is not strictly before the end.
    pub fn parse(start: &str, end: &str) -> ScheduleResult<Self> {
        let start_minutes = calendar::minutes_from_hhmm(start).ok_or_else(|| {
            ScheduleError::ValidationError(format!("malformed start time {start:?}"))
        })?;
        let end_minutes = calendar::minutes_from_hhmm(end)
            .ok_or_else(|| ScheduleError::ValidationError(format!("malformed end time {end:?}")))?;
        if start_minutes >= end_minutes {
            return Err(ScheduleError::ValidationError(format!(
                "start time {start} must be before end time {end}"
            )));
        }
        Ok(Self {
            start_minutes,
            end_minutes,
        })
    }

    /// Stored-timestamp form of the start time.
    #[must_use]
    pub fn start_stored(self) -> DateTime<Utc> {
        calendar::stored_time(self.start_minutes)
    }

    /// Stored-timestamp form of the end time.
    #[must_use]
    pub fn end_stored(self) -> DateTime<Utc> {
        calendar::stored_time(self.end_minutes)
    }
}
