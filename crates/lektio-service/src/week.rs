//! Week-view assembly: fetch, expand, compose.
//!
//! Re-fetching and re-expanding is the only source of truth for the
//! displayed week; there is no incremental patching of a previous
//! expansion. Callers re-run [`load_week`] after every committed edit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceResult;
use lektio_db::store::ScheduleStore;
use lektio_schedule::calendar::start_of_week;
use lektio_schedule::compose::{compose, one_off_occurrence};
use lektio_schedule::expand::expand_week;
use lektio_schedule::model::Occurrence;

/// The composed calendar week handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekView {
    /// The Monday anchoring this week.
    pub week_start: NaiveDate,
    /// Recurring occurrences followed by one-off slots, uniform shape.
    pub occurrences: Vec<Occurrence>,
}

/// ## Summary
/// Loads and expands the week containing `any_date` for one teacher.
/// The anchor is normalized to its Monday here, so callers may pass any
/// date of the week.
///
/// ## Errors
/// Propagates store failures. Expansion itself cannot fail; dates that
/// do not apply are simply absent from the output.
pub async fn load_week(
    store: &dyn ScheduleStore,
    teacher_id: Uuid,
    any_date: NaiveDate,
) -> ServiceResult<WeekView> {
    let week_start = start_of_week(any_date);

    let schedules = store.list_recurring_schedules(teacher_id).await?;
    let slots = store.list_one_off_slots(teacher_id, week_start).await?;

    let recurring = expand_week(&schedules, week_start);
    let one_off = slots.iter().map(one_off_occurrence).collect();
    let occurrences = compose(recurring, one_off);

    tracing::debug!(
        %teacher_id,
        %week_start,
        schedule_count = schedules.len(),
        occurrence_count = occurrences.len(),
        "week view assembled"
    );

    Ok(WeekView {
        week_start,
        occurrences,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use lektio_db::memory::MemoryStore;
    use lektio_schedule::calendar::DayOfWeek;
    use lektio_schedule::model::{OneOffSlot, RecurringSchedule};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn schedule(teacher_id: Uuid) -> RecurringSchedule {
        RecurringSchedule {
            id: Uuid::new_v4(),
            teacher_id,
            start_date: date(2026, 2, 2),
            end_date: None,
            start_time: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap(),
            days: vec![DayOfWeek::Monday, DayOfWeek::Wednesday, DayOfWeek::Friday],
            max_students: 4,
            exceptions: Vec::new(),
            day_assignments: Vec::new(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_load_week_normalizes_anchor_and_merges_slots() {
        let store = MemoryStore::new();
        let teacher = Uuid::new_v4();
        store.create_schedule(schedule(teacher)).await.unwrap();
        store
            .create_one_off_slot(OneOffSlot {
                id: Uuid::new_v4(),
                teacher_id: teacher,
                date: date(2026, 2, 7),
                start_time: Utc.with_ymd_and_hms(2026, 1, 1, 16, 0, 0).unwrap(),
                end_time: Utc.with_ymd_and_hms(2026, 1, 1, 17, 0, 0).unwrap(),
                max_students: 1,
                student_ids: Vec::new(),
            })
            .await
            .unwrap();

        // Thursday of the target week; anchor must normalize to Monday.
        let view = load_week(&store, teacher, date(2026, 2, 5)).await.unwrap();

        assert_eq!(view.week_start, date(2026, 2, 2));
        assert_eq!(view.occurrences.len(), 4);
        assert_eq!(view.occurrences[3].date, date(2026, 2, 7));
    }

    #[test_log::test(tokio::test)]
    async fn test_load_week_is_scoped_to_teacher() {
        let store = MemoryStore::new();
        let teacher = Uuid::new_v4();
        store.create_schedule(schedule(teacher)).await.unwrap();
        store
            .create_schedule(schedule(Uuid::new_v4()))
            .await
            .unwrap();

        let view = load_week(&store, teacher, date(2026, 2, 2)).await.unwrap();
        assert_eq!(view.occurrences.len(), 3);
    }
}
