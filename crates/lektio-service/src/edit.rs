//! The occurrence-scope edit protocol.
//!
//! An edit to a displayed occurrence commits in exactly one of two
//! mutually exclusive scopes, chosen explicitly by the caller:
//!
//! - **Instance**: upsert an exception keyed by (schedule, date). The
//!   recurring schedule itself is never touched.
//! - **Series**: mutate the schedule's base pattern. Every occurrence
//!   without its own exception follows; existing exceptions keep
//!   overriding (sticky by design).
//!
//! All validation happens before any write; a rejected edit leaves the
//! store untouched. After a committed edit the caller re-runs week
//! expansion; nothing here patches a previous expansion in place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ServiceResult;
use lektio_db::store::{ScheduleStore, SeriesPatch};
use lektio_schedule::calendar::DayOfWeek;
use lektio_schedule::model::TimeRange;

/// Which occurrences an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditScope {
    /// This occurrence only (via an exception record).
    Instance,
    /// This and all occurrences (via the base pattern).
    Series,
}

/// Series-scope edit request: new base times, with optional weekday and
/// start-date refinements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesEdit {
    pub start_time: String,
    pub end_time: String,
    pub days: Option<Vec<DayOfWeek>>,
    pub start_date: Option<NaiveDate>,
}

/// ## Summary
/// Instance scope: moves the single occurrence on `date` to the given
/// times by upserting its exception. Idempotent; repeating the edit
/// rewrites the same exception (last write wins on times).
///
/// ## Errors
/// Rejects malformed or inverted times before any write; propagates
/// `NotFound` when the schedule was deleted concurrently.
pub async fn reschedule_occurrence(
    store: &dyn ScheduleStore,
    schedule_id: Uuid,
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
) -> ServiceResult<()> {
    let range = TimeRange::parse(start_time, end_time)?;

    store
        .upsert_exception(
            schedule_id,
            date,
            Some((range.start_stored(), range.end_stored())),
        )
        .await?;

    tracing::info!(%schedule_id, %date, start_time, end_time, "occurrence rescheduled");
    Ok(())
}

/// ## Summary
/// Series scope: rewrites the schedule's base times (and optionally its
/// weekday set and start date). Applies to every past and future
/// occurrence that has no exception of its own; the model carries no
/// "apply from date" semantics. Exceptions are left untouched and
/// continue to override.
///
/// ## Errors
/// Rejects malformed or inverted times and an empty or duplicated
/// weekday set before any write; propagates `NotFound` for a missing
/// schedule.
pub async fn reschedule_series(
    store: &dyn ScheduleStore,
    schedule_id: Uuid,
    edit: SeriesEdit,
) -> ServiceResult<()> {
    let range = TimeRange::parse(&edit.start_time, &edit.end_time)?;
    if let Some(days) = &edit.days {
        if days.is_empty() {
            return Err(crate::error::ServiceError::ValidationError(
                "schedule must repeat on at least one weekday".to_string(),
            ));
        }
        for (i, day) in days.iter().enumerate() {
            if days[..i].contains(day) {
                return Err(crate::error::ServiceError::ValidationError(format!(
                    "duplicate weekday {day}"
                )));
            }
        }
    }

    store
        .update_schedule_series(
            schedule_id,
            SeriesPatch {
                start_time: range.start_stored(),
                end_time: range.end_stored(),
                days: edit.days,
                start_date: edit.start_date,
            },
        )
        .await?;

    tracing::info!(%schedule_id, "schedule series updated");
    Ok(())
}

/// ## Summary
/// Instance-scope deletion: records a cancelling exception for `date`.
/// Nothing structural is deleted; the schedule and its other
/// occurrences are unaffected.
///
/// ## Errors
/// Propagates `NotFound` for a missing schedule.
pub async fn cancel_occurrence(
    store: &dyn ScheduleStore,
    schedule_id: Uuid,
    date: NaiveDate,
) -> ServiceResult<()> {
    store.upsert_exception(schedule_id, date, None).await?;
    tracing::info!(%schedule_id, %date, "occurrence cancelled");
    Ok(())
}

/// ## Summary
/// Series-scope deletion: removes the schedule and cascades deletion of
/// its exceptions.
///
/// ## Errors
/// Propagates `NotFound` for a missing schedule.
pub async fn delete_series(store: &dyn ScheduleStore, schedule_id: Uuid) -> ServiceResult<()> {
    store.delete_schedule(schedule_id).await?;
    tracing::info!(%schedule_id, "schedule series deleted");
    Ok(())
}

/// ## Summary
/// Deletes a one-off slot outright; one-off slots have no scope split.
///
/// ## Errors
/// Propagates `NotFound` for a missing slot.
pub async fn delete_one_off(store: &dyn ScheduleStore, slot_id: Uuid) -> ServiceResult<()> {
    store.delete_one_off_slot(slot_id).await?;
    tracing::info!(%slot_id, "one-off slot deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::week::load_week;
    use lektio_db::memory::MemoryStore;
    use lektio_schedule::model::RecurringSchedule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn mwf_schedule(teacher_id: Uuid) -> RecurringSchedule {
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

    async fn seeded_store() -> (MemoryStore, Uuid, Uuid) {
        let store = MemoryStore::new();
        let teacher = Uuid::new_v4();
        let schedule = mwf_schedule(teacher);
        let id = schedule.id;
        store.create_schedule(schedule).await.unwrap();
        (store, teacher, id)
    }

    #[test_log::test(tokio::test)]
    async fn test_series_edit_moves_every_unexceptioned_day() {
        let (store, teacher, id) = seeded_store().await;

        reschedule_series(
            &store,
            id,
            SeriesEdit {
                start_time: "14:00".to_string(),
                end_time: "15:00".to_string(),
                days: None,
                start_date: None,
            },
        )
        .await
        .unwrap();

        let view = load_week(&store, teacher, date(2026, 2, 2)).await.unwrap();
        assert_eq!(view.occurrences.len(), 3);
        for occ in &view.occurrences {
            assert_eq!(occ.start_time, "14:00");
            assert_eq!(occ.end_time, "15:00");
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_series_edit_leaves_existing_exceptions_in_place() {
        let (store, teacher, id) = seeded_store().await;
        reschedule_occurrence(&store, id, date(2026, 2, 4), "11:00", "12:00")
            .await
            .unwrap();

        reschedule_series(
            &store,
            id,
            SeriesEdit {
                start_time: "14:00".to_string(),
                end_time: "15:00".to_string(),
                days: None,
                start_date: None,
            },
        )
        .await
        .unwrap();

        let view = load_week(&store, teacher, date(2026, 2, 2)).await.unwrap();
        let wednesday = view
            .occurrences
            .iter()
            .find(|occ| occ.date == date(2026, 2, 4))
            .expect("wednesday occurrence");
        // The exception stays sticky over the new base times.
        assert_eq!(wednesday.start_time, "11:00");
        let monday = view
            .occurrences
            .iter()
            .find(|occ| occ.date == date(2026, 2, 2))
            .expect("monday occurrence");
        assert_eq!(monday.start_time, "14:00");
    }

    #[test_log::test(tokio::test)]
    async fn test_instance_edit_is_idempotent() {
        let (store, teacher, id) = seeded_store().await;

        reschedule_occurrence(&store, id, date(2026, 2, 4), "11:00", "12:00")
            .await
            .unwrap();
        reschedule_occurrence(&store, id, date(2026, 2, 4), "11:00", "12:00")
            .await
            .unwrap();

        let schedule = store.find_schedule(id).await.unwrap();
        assert_eq!(schedule.exceptions.len(), 1);
        let view = load_week(&store, teacher, date(2026, 2, 2)).await.unwrap();
        assert_eq!(view.occurrences.len(), 3);
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_times_rejected_before_any_write() {
        let (store, _, id) = seeded_store().await;

        let err = reschedule_occurrence(&store, id, date(2026, 2, 4), "12:00", "11:00")
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = reschedule_series(
            &store,
            id,
            SeriesEdit {
                start_time: "nope".to_string(),
                end_time: "15:00".to_string(),
                days: None,
                start_date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());

        // Nothing was written.
        let schedule = store.find_schedule(id).await.unwrap();
        assert!(schedule.exceptions.is_empty());
        assert_eq!(schedule.start_minutes(), 9 * 60);
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_day_set_rejected() {
        let (store, _, id) = seeded_store().await;

        let err = reschedule_series(
            &store,
            id,
            SeriesEdit {
                start_time: "14:00".to_string(),
                end_time: "15:00".to_string(),
                days: Some(Vec::new()),
                start_date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());
    }

    #[test_log::test(tokio::test)]
    async fn test_duplicate_day_set_rejected() {
        let (store, _, id) = seeded_store().await;

        let err = reschedule_series(
            &store,
            id,
            SeriesEdit {
                start_time: "14:00".to_string(),
                end_time: "15:00".to_string(),
                days: Some(vec![DayOfWeek::Monday, DayOfWeek::Monday]),
                start_date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());

        // The same invariant the create path enforces; nothing was
        // written.
        let schedule = store.find_schedule(id).await.unwrap();
        assert_eq!(schedule.days.len(), 3);
        assert_eq!(schedule.start_minutes(), 9 * 60);
    }

    #[test_log::test(tokio::test)]
    async fn test_cancel_occurrence_removes_only_that_date() {
        let (store, teacher, id) = seeded_store().await;

        cancel_occurrence(&store, id, date(2026, 2, 4)).await.unwrap();

        let view = load_week(&store, teacher, date(2026, 2, 2)).await.unwrap();
        assert_eq!(view.occurrences.len(), 2);
        assert!(view.occurrences.iter().all(|occ| occ.date != date(2026, 2, 4)));
    }

    #[test_log::test(tokio::test)]
    async fn test_delete_series_cascades() {
        let (store, teacher, id) = seeded_store().await;
        cancel_occurrence(&store, id, date(2026, 2, 4)).await.unwrap();

        delete_series(&store, id).await.unwrap();

        let view = load_week(&store, teacher, date(2026, 2, 2)).await.unwrap();
        assert!(view.occurrences.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_edits_on_missing_schedule_are_hard_failures() {
        let store = MemoryStore::new();
        let missing = Uuid::new_v4();

        let err = reschedule_occurrence(&store, missing, date(2026, 2, 4), "11:00", "12:00")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = delete_series(&store, missing).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
