//! In-memory `ScheduleStore` used by the app and the test suites.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::store::{ScheduleStore, SeriesPatch, StoreFuture};
use lektio_schedule::calendar::add_days;
use lektio_schedule::model::{OneOffSlot, RecurringException, RecurringSchedule};

#[derive(Debug, Default)]
struct State {
    schedules: HashMap<Uuid, RecurringSchedule>,
    one_off_slots: HashMap<Uuid, OneOffSlot>,
}

/// Mutex-guarded id-keyed maps. Exceptions live nested in their
/// schedule, so schedule deletion cascades them for free.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the state, recovering from poisoning; no invariant spans
    /// a panic here.
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                self.state.clear_poison();
                poisoned.into_inner()
            }
        }
    }

    fn with_schedule<T>(
        &self,
        schedule_id: Uuid,
        apply: impl FnOnce(&mut RecurringSchedule) -> T,
    ) -> StoreResult<T> {
        let mut state = self.lock();
        state
            .schedules
            .get_mut(&schedule_id)
            .map(apply)
            .ok_or_else(|| StoreError::NotFound(format!("schedule {schedule_id}")))
    }
}

impl ScheduleStore for MemoryStore {
    fn list_recurring_schedules(&self, teacher_id: Uuid) -> StoreFuture<'_, Vec<RecurringSchedule>> {
        let mut schedules: Vec<RecurringSchedule> = self
            .lock()
            .schedules
            .values()
            .filter(|schedule| schedule.teacher_id == teacher_id)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; keep list output stable.
        schedules.sort_by_key(|schedule| schedule.id);
        Box::pin(async move { Ok(schedules) })
    }

    fn list_one_off_slots(
        &self,
        teacher_id: Uuid,
        week_start: NaiveDate,
    ) -> StoreFuture<'_, Vec<OneOffSlot>> {
        let week_end = add_days(week_start, 6);
        let mut slots: Vec<OneOffSlot> = self
            .lock()
            .one_off_slots
            .values()
            .filter(|slot| {
                slot.teacher_id == teacher_id
                    && slot.date >= week_start
                    && slot.date <= week_end
            })
            .cloned()
            .collect();
        slots.sort_by_key(|slot| (slot.date, slot.id));
        Box::pin(async move { Ok(slots) })
    }

    fn find_schedule(&self, schedule_id: Uuid) -> StoreFuture<'_, RecurringSchedule> {
        let found = self
            .lock()
            .schedules
            .get(&schedule_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("schedule {schedule_id}")));
        Box::pin(async move { found })
    }

    fn create_schedule(&self, schedule: RecurringSchedule) -> StoreFuture<'_, ()> {
        let result = {
            let mut state = self.lock();
            if state.schedules.contains_key(&schedule.id) {
                Err(StoreError::Conflict(format!("schedule {}", schedule.id)))
            } else {
                tracing::debug!(schedule_id = %schedule.id, "schedule created");
                state.schedules.insert(schedule.id, schedule);
                Ok(())
            }
        };
        Box::pin(async move { result })
    }

    fn create_one_off_slot(&self, slot: OneOffSlot) -> StoreFuture<'_, ()> {
        let result = {
            let mut state = self.lock();
            if state.one_off_slots.contains_key(&slot.id) {
                Err(StoreError::Conflict(format!("slot {}", slot.id)))
            } else {
                state.one_off_slots.insert(slot.id, slot);
                Ok(())
            }
        };
        Box::pin(async move { result })
    }

    fn upsert_exception(
        &self,
        schedule_id: Uuid,
        date: NaiveDate,
        override_times: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> StoreFuture<'_, ()> {
        let result = self.with_schedule(schedule_id, |schedule| {
            let (start_time, end_time) = match override_times {
                Some((start, end)) => (Some(start), Some(end)),
                None => (None, None),
            };
            let exception = RecurringException {
                recurring_schedule_id: schedule_id,
                date,
                start_time,
                end_time,
            };
            // At most one exception per (schedule, date): last write wins.
            schedule.exceptions.retain(|existing| existing.date != date);
            schedule.exceptions.push(exception);
            tracing::debug!(%schedule_id, %date, "exception upserted");
        });
        Box::pin(async move { result })
    }

    fn update_schedule_series(&self, schedule_id: Uuid, patch: SeriesPatch) -> StoreFuture<'_, ()> {
        let result = self.with_schedule(schedule_id, |schedule| {
            schedule.start_time = patch.start_time;
            schedule.end_time = patch.end_time;
            if let Some(days) = patch.days {
                schedule.days = days;
            }
            if let Some(start_date) = patch.start_date {
                schedule.start_date = start_date;
            }
            tracing::debug!(%schedule_id, "schedule series updated");
        });
        Box::pin(async move { result })
    }

    fn delete_schedule(&self, schedule_id: Uuid) -> StoreFuture<'_, ()> {
        let result = self
            .lock()
            .schedules
            .remove(&schedule_id)
            .map(|_| tracing::debug!(%schedule_id, "schedule deleted"))
            .ok_or_else(|| StoreError::NotFound(format!("schedule {schedule_id}")));
        Box::pin(async move { result })
    }

    fn delete_one_off_slot(&self, slot_id: Uuid) -> StoreFuture<'_, ()> {
        let result = self
            .lock()
            .one_off_slots
            .remove(&slot_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(format!("slot {slot_id}")));
        Box::pin(async move { result })
    }
}
