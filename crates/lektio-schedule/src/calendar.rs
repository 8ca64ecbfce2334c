//! Pure date/time primitives: week-start computation, day arithmetic,
//! and conversions between stored timestamps, minutes-since-midnight,
//! and wall-clock time strings.
//!
//! These functions do not validate their input beyond what their
//! signatures express; callers at the system boundary are responsible
//! for sanitization.

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Weekday tag used throughout the scheduler. The wire form matches the
/// stored three-letter tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "MON")]
    Monday,
    #[serde(rename = "TUE")]
    Tuesday,
    #[serde(rename = "WED")]
    Wednesday,
    #[serde(rename = "THU")]
    Thursday,
    #[serde(rename = "FRI")]
    Friday,
    #[serde(rename = "SAT")]
    Saturday,
    #[serde(rename = "SUN")]
    Sunday,
}

impl DayOfWeek {
    /// The seven weekdays in Mon→Sun order. Index 0 is Monday; this
    /// array is the authoritative index→tag mapping for week expansion.
    pub const WEEK: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "MON",
            Self::Tuesday => "TUE",
            Self::Wednesday => "WED",
            Self::Thursday => "THU",
            Self::Friday => "FRI",
            Self::Saturday => "SAT",
            Self::Sunday => "SUN",
        }
    }

    /// Position in the Mon→Sun week, 0-based.
    #[must_use]
    pub const fn week_index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    /// Weekday tag of a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::WEEK[date.weekday().num_days_from_monday() as usize]
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ## Summary
/// Returns the Monday of the week containing `date` (ISO convention).
///
/// A Sunday belongs to the week of the Monday six days earlier, never
/// the Monday one day later.
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let days_since_monday = i64::from(date.weekday().num_days_from_monday());
    add_days(date, -days_since_monday)
}

/// Calendar-day arithmetic; `n` may be negative.
#[must_use]
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date.checked_add_signed(TimeDelta::days(n)).unwrap_or(date)
}

/// The seven dates of the week starting at `week_start`, Mon→Sun.
#[must_use]
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; 7] {
    let mut dates = [week_start; 7];
    for i in 1..7 {
        dates[i] = add_days(dates[i - 1], 1);
    }
    dates
}

/// Compares the UTC year/month/day components only.
#[must_use]
pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive()
}

/// ## Summary
/// Reads the time-of-day of a stored timestamp as minutes since
/// midnight, in the UTC frame.
///
/// The timestamp's date component is a storage artifact and is ignored.
#[must_use]
pub fn time_of_day_minutes(ts: DateTime<Utc>) -> u32 {
    ts.hour() * 60 + ts.minute()
}

/// ## Summary
/// Builds the stored-timestamp form of a time-of-day, anchored on the
/// Unix epoch day. Inverse of [`time_of_day_minutes`].
#[must_use]
pub fn stored_time(minutes: u32) -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::minutes(i64::from(minutes))
}

/// Parses a zero-padded `"HH:MM"` string into minutes since midnight.
#[must_use]
pub fn minutes_from_hhmm(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Formats minutes since midnight as a zero-padded `"HH:MM"` string.
#[must_use]
pub fn minutes_to_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// ## Summary
/// Formats an `"HH:MM"` string in 12-hour clock form, e.g. `"14:30"`
/// becomes `"2:30 PM"` and `"00:05"` becomes `"12:05 AM"`.
///
/// Malformed input is returned unchanged.
#[must_use]
pub fn format_twelve_hour(time: &str) -> String {
    let Some(total) = minutes_from_hhmm(time) else {
        return time.to_string();
    };
    let hours = total / 60;
    let minutes = total % 60;
    let suffix = if hours < 12 { "AM" } else { "PM" };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{display_hours}:{minutes:02} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_start_of_week_monday_is_identity() {
        // 2026-02-02 is a Monday
        assert_eq!(start_of_week(date(2026, 2, 2)), date(2026, 2, 2));
    }

    #[test]
    fn test_start_of_week_midweek() {
        assert_eq!(start_of_week(date(2026, 2, 4)), date(2026, 2, 2));
        assert_eq!(start_of_week(date(2026, 2, 7)), date(2026, 2, 2));
    }

    #[test]
    fn test_start_of_week_sunday_goes_back_six_days() {
        // 2026-02-08 is a Sunday; its week starts 2026-02-02, not 2026-02-09
        assert_eq!(start_of_week(date(2026, 2, 8)), date(2026, 2, 2));
    }

    #[test]
    fn test_add_days_across_month_boundary() {
        assert_eq!(add_days(date(2026, 1, 30), 3), date(2026, 2, 2));
        assert_eq!(add_days(date(2026, 3, 2), -3), date(2026, 2, 27));
    }

    #[test]
    fn test_week_dates_are_consecutive() {
        let dates = week_dates(date(2026, 2, 2));
        assert_eq!(dates[0], date(2026, 2, 2));
        assert_eq!(dates[6], date(2026, 2, 8));
        for (i, d) in dates.iter().enumerate() {
            assert_eq!(DayOfWeek::from_date(*d), DayOfWeek::WEEK[i]);
        }
    }

    #[test]
    fn test_same_calendar_day_ignores_time() {
        let morning = Utc.with_ymd_and_hms(2026, 2, 4, 0, 5, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2026, 2, 4, 23, 55, 0).unwrap();
        let next = Utc.with_ymd_and_hms(2026, 2, 5, 0, 0, 0).unwrap();
        assert!(same_calendar_day(morning, evening));
        assert!(!same_calendar_day(evening, next));
    }

    #[test]
    fn test_time_of_day_ignores_stored_date() {
        // The date component of a stored time is an artifact; two
        // timestamps years apart with the same wall-clock time must
        // read identically.
        let a = Utc.with_ymd_and_hms(1970, 1, 1, 9, 30, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2026, 2, 4, 9, 30, 0).unwrap();
        assert_eq!(time_of_day_minutes(a), 570);
        assert_eq!(time_of_day_minutes(b), 570);
    }

    #[test]
    fn test_stored_time_round_trip() {
        assert_eq!(time_of_day_minutes(stored_time(570)), 570);
        assert_eq!(time_of_day_minutes(stored_time(0)), 0);
        assert_eq!(time_of_day_minutes(stored_time(23 * 60 + 59)), 23 * 60 + 59);
    }

    #[test]
    fn test_minutes_from_hhmm() {
        assert_eq!(minutes_from_hhmm("09:00"), Some(540));
        assert_eq!(minutes_from_hhmm("00:00"), Some(0));
        assert_eq!(minutes_from_hhmm("23:59"), Some(1439));
        assert_eq!(minutes_from_hhmm("24:00"), None);
        assert_eq!(minutes_from_hhmm("9am"), None);
        assert_eq!(minutes_from_hhmm(""), None);
    }

    #[test]
    fn test_minutes_to_hhmm_zero_pads() {
        assert_eq!(minutes_to_hhmm(540), "09:00");
        assert_eq!(minutes_to_hhmm(5), "00:05");
        assert_eq!(minutes_to_hhmm(1439), "23:59");
    }

    #[test]
    fn test_format_twelve_hour() {
        assert_eq!(format_twelve_hour("09:00"), "9:00 AM");
        assert_eq!(format_twelve_hour("14:30"), "2:30 PM");
        assert_eq!(format_twelve_hour("00:05"), "12:05 AM");
        assert_eq!(format_twelve_hour("12:00"), "12:00 PM");
        assert_eq!(format_twelve_hour("not a time"), "not a time");
    }

    #[test]
    fn test_day_of_week_round_trip() {
        for (i, day) in DayOfWeek::WEEK.iter().enumerate() {
            assert_eq!(day.week_index(), i);
        }
        assert_eq!(DayOfWeek::from_date(date(2026, 2, 2)), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from_date(date(2026, 2, 8)), DayOfWeek::Sunday);
    }
}
