//! The data-access interface the scheduling core is written against.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::StoreResult;
use lektio_schedule::calendar::DayOfWeek;
use lektio_schedule::model::{OneOffSlot, RecurringSchedule};

/// Boxed future returned by store methods, keeping the trait object-safe.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = StoreResult<T>> + Send + 'a>>;

/// Series-scope mutation of a recurring schedule's base pattern.
///
/// `start_time`/`end_time` are stored-timestamp forms (date component
/// irrelevant). `days` and `start_date` are optional refinements; `None`
/// leaves the current value in place.
#[derive(Debug, Clone)]
pub struct SeriesPatch {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub days: Option<Vec<DayOfWeek>>,
    pub start_date: Option<NaiveDate>,
}

/// ## Summary
/// Find/create/update/delete operations over recurring schedules,
/// exceptions, and one-off slots.
///
/// Every mutation on an id that no longer exists fails with
/// `StoreError::NotFound`; callers treat that as a hard failure and
/// discard any optimistic state. Implementations own last-write-wins
/// semantics for concurrent edits; the scheduling core does not detect
/// conflicts.
pub trait ScheduleStore: Send + Sync {
    /// All recurring schedules of one teacher, with nested exceptions
    /// and day assignments.
    fn list_recurring_schedules(&self, teacher_id: Uuid) -> StoreFuture<'_, Vec<RecurringSchedule>>;

    /// One-off slots of one teacher falling inside the 7-day window
    /// starting at `week_start`.
    fn list_one_off_slots(
        &self,
        teacher_id: Uuid,
        week_start: NaiveDate,
    ) -> StoreFuture<'_, Vec<OneOffSlot>>;

    fn find_schedule(&self, schedule_id: Uuid) -> StoreFuture<'_, RecurringSchedule>;

    fn create_schedule(&self, schedule: RecurringSchedule) -> StoreFuture<'_, ()>;

    fn create_one_off_slot(&self, slot: OneOffSlot) -> StoreFuture<'_, ()>;

    /// Upserts the exception keyed by (`schedule_id`, `date`). `None`
    /// override times record a cancellation; a second upsert for the
    /// same date replaces the first (last write wins).
    fn upsert_exception(
        &self,
        schedule_id: Uuid,
        date: NaiveDate,
        override_times: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> StoreFuture<'_, ()>;

    /// Mutates the base pattern of a schedule. Exceptions are not
    /// touched and continue to override.
    fn update_schedule_series(&self, schedule_id: Uuid, patch: SeriesPatch) -> StoreFuture<'_, ()>;

    /// Deletes a schedule and cascades deletion of its exceptions.
    fn delete_schedule(&self, schedule_id: Uuid) -> StoreFuture<'_, ()>;

    fn delete_one_off_slot(&self, slot_id: Uuid) -> StoreFuture<'_, ()>;
}
