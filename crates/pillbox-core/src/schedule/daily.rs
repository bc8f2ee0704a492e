//! Daily schedule evaluation.

use chrono::{Days, NaiveDateTime};

use super::window::{at_minute, format_clock, within_tolerance};
use crate::models::DailySchedule;

/// Due window around each scheduled time, in minutes.
const DUE_TOLERANCE_MIN: u16 = 15;

impl DailySchedule {
    /// Earliest configured time strictly after `from` on the same day,
    /// wrapping to the first time of the next day once today's are
    /// exhausted. `None` when no times are configured.
    pub fn next_dose(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        let today = from.date();
        // times is sorted ascending, so the first hit is the earliest
        if let Some(at) = self
            .times
            .iter()
            .map(|&t| at_minute(today, t))
            .find(|&at| at > from)
        {
            return Some(at);
        }
        let tomorrow = today.checked_add_days(Days::new(1))?;
        self.times.first().map(|&t| at_minute(tomorrow, t))
    }

    /// Whether any configured time is within the due window of `instant`'s
    /// time-of-day, regardless of date.
    pub fn is_due_at(&self, instant: NaiveDateTime) -> bool {
        self.times
            .iter()
            .any(|&t| within_tolerance(instant, t, DUE_TOLERANCE_MIN))
    }

    /// Render as "Daily at 8:00 AM, 8:00 PM".
    pub fn describe(&self) -> String {
        if self.times.is_empty() {
            return "Daily".to_string();
        }
        let times: Vec<String> = self.times.iter().map(|&t| format_clock(t)).collect();
        format!("Daily at {}", times.join(", "))
    }
}
