//! Week expansion: turns recurring schedule definitions into the
//! concrete occurrences of one target week.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::calendar::{self, DayOfWeek};
use crate::model::{Occurrence, OccurrenceSource, RecurringException, RecurringSchedule};

/// ## Summary
/// Expands `schedules` into concrete occurrences for the week starting
/// at `week_start`, which callers must normalize to a Monday via
/// [`calendar::start_of_week`].
///
/// Per schedule, per week date (Mon→Sun), an occurrence is emitted iff:
/// - the date's weekday tag is in the schedule's `days`,
/// - the date is on or after `start_date`,
/// - the date is on or before `end_date` when one is set (inclusive),
/// - no cancelling exception exists for the date.
///
/// The weekday tag is taken from the date's position in the week, not
/// re-derived in some other frame; the index mapping is authoritative.
/// An exception with both times set replaces the schedule's default
/// times for that date only. Exceptions on dates that fail the gates
/// above are never consulted; they cannot resurrect an invalid date.
///
/// Output is grouped by schedule, Mon→Sun within a schedule. Expansion
/// is deterministic: it never reads the clock, never deduplicates, and
/// never detects conflicts between overlapping schedules.
#[must_use]
pub fn expand_week(schedules: &[RecurringSchedule], week_start: NaiveDate) -> Vec<Occurrence> {
    debug_assert_eq!(
        calendar::start_of_week(week_start),
        week_start,
        "week_start must be a Monday"
    );

    let dates = calendar::week_dates(week_start);
    let mut occurrences = Vec::new();

    for schedule in schedules {
        // Exception lookup is by date-only key in the same frame as the
        // week dates.
        let exceptions: HashMap<NaiveDate, &RecurringException> = schedule
            .exceptions
            .iter()
            .map(|exception| (exception.date, exception))
            .collect();

        for (day, date) in DayOfWeek::WEEK.into_iter().zip(dates) {
            if !schedule.days.contains(&day) {
                continue;
            }
            if date < schedule.start_date {
                continue;
            }
            if schedule.end_date.is_some_and(|end| date > end) {
                continue;
            }

            let exception = exceptions.get(&date).copied();
            if exception.is_some_and(|e| e.is_cancellation()) {
                tracing::trace!(schedule_id = %schedule.id, %date, "occurrence cancelled by exception");
                continue;
            }

            let (start_time, end_time) = exception
                .and_then(RecurringException::override_times)
                .unwrap_or((schedule.start_time, schedule.end_time));

            let start_minutes = calendar::time_of_day_minutes(start_time);
            let end_minutes = calendar::time_of_day_minutes(end_time);

            occurrences.push(Occurrence {
                source: OccurrenceSource::Recurring(schedule.id),
                date,
                day,
                start_minutes,
                end_minutes,
                start_time: calendar::minutes_to_hhmm(start_minutes),
                end_time: calendar::minutes_to_hhmm(end_minutes),
                max_students: schedule.max_students,
                student_ids: schedule.students_on(day),
            });
        }
    }

    occurrences
}
