//! Shared time-window helpers for schedule evaluation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::models::MINUTES_PER_DAY;

/// Minute-of-day offset of a timestamp (0-1439).
pub fn minute_of_day(t: NaiveDateTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

/// Distance in minutes between two minute-of-day offsets, wrapping across
/// midnight (23:55 and 00:05 are 10 minutes apart, not 1430).
pub fn minute_distance(a: u16, b: u16) -> u16 {
    let d = a.abs_diff(b);
    d.min(MINUTES_PER_DAY - d)
}

/// Whether `instant`'s time-of-day is within `tolerance` minutes of the
/// target offset, regardless of date.
pub fn within_tolerance(instant: NaiveDateTime, target: u16, tolerance: u16) -> bool {
    minute_distance(minute_of_day(instant), target % MINUTES_PER_DAY) <= tolerance
}

/// The timestamp on `date` at the given minute-of-day offset.
pub fn at_minute(date: NaiveDate, minute: u16) -> NaiveDateTime {
    let minute = u32::from(minute % MINUTES_PER_DAY);
    let time = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

/// Render a minute-of-day offset on the 12-hour clock ("8:00 AM").
pub fn format_clock(minute: u16) -> String {
    let minute = minute % MINUTES_PER_DAY;
    let hour24 = minute / 60;
    let min = minute % 60;
    let (hour, meridiem) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{}:{:02} {}", hour, min, meridiem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_minute_of_day() {
        assert_eq!(minute_of_day(dt(0, 0)), 0);
        assert_eq!(minute_of_day(dt(8, 30)), 510);
        assert_eq!(minute_of_day(dt(23, 59)), 1439);
    }

    #[test]
    fn test_minute_distance_wraps_midnight() {
        assert_eq!(minute_distance(480, 495), 15);
        assert_eq!(minute_distance(495, 480), 15);
        // 23:55 vs 00:05
        assert_eq!(minute_distance(1435, 5), 10);
        assert_eq!(minute_distance(5, 1435), 10);
        assert_eq!(minute_distance(0, 720), 720);
    }

    #[test]
    fn test_within_tolerance_boundaries() {
        // Target 8:00, tolerance 15
        assert!(within_tolerance(dt(7, 45), 480, 15));
        assert!(within_tolerance(dt(8, 15), 480, 15));
        assert!(!within_tolerance(dt(7, 44), 480, 15));
        assert!(!within_tolerance(dt(8, 16), 480, 15));
    }

    #[test]
    fn test_at_minute() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(at_minute(date, 480), dt(8, 0));
        assert_eq!(at_minute(date, 0), dt(0, 0));
        assert_eq!(at_minute(date, 1439), dt(23, 59));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "12:00 AM");
        assert_eq!(format_clock(480), "8:00 AM");
        assert_eq!(format_clock(720), "12:00 PM");
        assert_eq!(format_clock(1200), "8:00 PM");
        assert_eq!(format_clock(1439), "11:59 PM");
    }
}
