//! View composition: merges expanded recurring occurrences with one-off
//! slots and provides the lookup/grouping helpers the edit layer needs.

use std::collections::HashMap;

use uuid::Uuid;

use crate::calendar::{self, DayOfWeek};
use crate::model::{Occurrence, OccurrenceSource, OneOffSlot, RecurringSchedule};

/// Concatenates recurring and one-off occurrences. Both kinds are
/// presented uniformly; no deduplication, no conflict detection.
#[must_use]
pub fn compose(recurring: Vec<Occurrence>, one_off: Vec<Occurrence>) -> Vec<Occurrence> {
    let mut occurrences = recurring;
    occurrences.extend(one_off);
    occurrences
}

/// Projects a one-off slot into the uniform occurrence shape.
#[must_use]
pub fn one_off_occurrence(slot: &OneOffSlot) -> Occurrence {
    let start_minutes = calendar::time_of_day_minutes(slot.start_time);
    let end_minutes = calendar::time_of_day_minutes(slot.end_time);
    Occurrence {
        source: OccurrenceSource::OneOff(slot.id),
        date: slot.date,
        day: DayOfWeek::from_date(slot.date),
        start_minutes,
        end_minutes,
        start_time: calendar::minutes_to_hhmm(start_minutes),
        end_time: calendar::minutes_to_hhmm(end_minutes),
        max_students: slot.max_students,
        student_ids: slot.student_ids.clone(),
    }
}

/// Indexes schedules by id for O(1) lookup during edit-scope
/// resolution, where only the occurrence is at hand.
#[must_use]
pub fn index_by_id(schedules: &[RecurringSchedule]) -> HashMap<Uuid, &RecurringSchedule> {
    schedules
        .iter()
        .map(|schedule| (schedule.id, schedule))
        .collect()
}

/// Groups occurrences into Mon→Sun weekday buckets for rendering.
/// Relative order within a bucket is preserved.
#[must_use]
pub fn bucket_by_day(occurrences: Vec<Occurrence>) -> [Vec<Occurrence>; 7] {
    let mut buckets: [Vec<Occurrence>; 7] = Default::default();
    for occurrence in occurrences {
        buckets[occurrence.day.week_index()].push(occurrence);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::expand::expand_week;
    use crate::model::RecurringSchedule;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn schedule() -> RecurringSchedule {
        RecurringSchedule {
            id: Uuid::new_v4(),
            teacher_id: Uuid::new_v4(),
            start_date: date(2026, 2, 2),
            end_date: None,
            start_time: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap(),
            days: vec![DayOfWeek::Monday, DayOfWeek::Friday],
            max_students: 2,
            exceptions: Vec::new(),
            day_assignments: Vec::new(),
        }
    }

    fn slot(d: NaiveDate) -> OneOffSlot {
        OneOffSlot {
            id: Uuid::new_v4(),
            teacher_id: Uuid::new_v4(),
            date: d,
            start_time: Utc.with_ymd_and_hms(2026, 1, 1, 13, 30, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 1, 1, 14, 30, 0).unwrap(),
            max_students: 1,
            student_ids: vec![Uuid::new_v4()],
        }
    }

    #[test]
    fn test_compose_concatenates_without_dedup() {
        let recurring = expand_week(&[schedule()], date(2026, 2, 2));
        let one_off = vec![one_off_occurrence(&slot(date(2026, 2, 2)))];

        let merged = compose(recurring.clone(), one_off);

        assert_eq!(merged.len(), recurring.len() + 1);
        assert_eq!(merged[..recurring.len()], recurring[..]);
    }

    #[test]
    fn test_one_off_projection() {
        let s = slot(date(2026, 2, 5));
        let occ = one_off_occurrence(&s);

        assert_eq!(occ.source, OccurrenceSource::OneOff(s.id));
        assert_eq!(occ.day, DayOfWeek::Thursday);
        assert_eq!(occ.start_time, "13:30");
        assert_eq!(occ.end_time, "14:30");
        assert_eq!(occ.student_ids, s.student_ids);
        assert!(occ.slot_key().is_none());
    }

    #[test]
    fn test_index_by_id() {
        let schedules = vec![schedule(), schedule()];
        let index = index_by_id(&schedules);

        assert_eq!(index.len(), 2);
        assert_eq!(index[&schedules[0].id].id, schedules[0].id);
        assert_eq!(index[&schedules[1].id].id, schedules[1].id);
    }

    #[test]
    fn test_bucket_by_day_preserves_order() {
        let recurring = expand_week(&[schedule()], date(2026, 2, 2));
        let one_off = vec![
            one_off_occurrence(&slot(date(2026, 2, 2))),
            one_off_occurrence(&slot(date(2026, 2, 8))),
        ];
        let buckets = bucket_by_day(compose(recurring, one_off));

        // Monday: the recurring occurrence first, then the one-off.
        assert_eq!(buckets[0].len(), 2);
        assert!(matches!(buckets[0][0].source, OccurrenceSource::Recurring(_)));
        assert!(matches!(buckets[0][1].source, OccurrenceSource::OneOff(_)));
        // Friday: recurring only; Sunday: one-off only.
        assert_eq!(buckets[4].len(), 1);
        assert_eq!(buckets[6].len(), 1);
        assert!(buckets[1].is_empty());
    }
}
