//! Weekly schedule evaluation.

use chrono::{Datelike, Days, NaiveDateTime};

use super::window::{at_minute, format_clock, within_tolerance};
use crate::models::{DayOfWeek, WeeklySchedule};

/// Due window around the scheduled time, in minutes.
const DUE_TOLERANCE_MIN: u16 = 15;

impl WeeklySchedule {
    /// Today's scheduled time if today is a scheduled weekday and the time
    /// is still ahead of `from`; otherwise the next scheduled weekday within
    /// the coming week. `None` when no weekdays are configured.
    pub fn next_dose(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        if self.days.is_empty() {
            return None;
        }
        let today = from.date();
        if self.is_scheduled_day(today.weekday()) {
            let at = at_minute(today, self.time);
            if at > from {
                return Some(at);
            }
        }
        for offset in 1..=7 {
            let date = today.checked_add_days(Days::new(offset))?;
            if self.is_scheduled_day(date.weekday()) {
                return Some(at_minute(date, self.time));
            }
        }
        None
    }

    /// Due on a scheduled weekday within the tolerance window of the
    /// scheduled time.
    pub fn is_due_at(&self, instant: NaiveDateTime) -> bool {
        self.is_scheduled_day(instant.date().weekday())
            && within_tolerance(instant, self.time, DUE_TOLERANCE_MIN)
    }

    /// Render as "Weekly on Monday, Wednesday at 9:00 AM", collapsing to a
    /// daily rendering when every weekday is scheduled.
    pub fn describe(&self) -> String {
        let clock = format_clock(self.time);
        if self.days.len() == DayOfWeek::ALL.len() {
            return format!("Daily at {}", clock);
        }
        let days: Vec<&str> = self.days.iter().map(|d| d.name()).collect();
        format!("Weekly on {} at {}", days.join(", "), clock)
    }
}
