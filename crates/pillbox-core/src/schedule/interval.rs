//! Interval schedule evaluation.

use chrono::{Duration, NaiveDateTime};

use crate::models::{IntervalSchedule, IntervalUnit};

/// Due window before each cadence point, in minutes.
const DUE_TOLERANCE_MIN: i64 = 30;

impl IntervalSchedule {
    /// The cadence step, or `None` for a non-positive amount.
    fn step(&self) -> Option<Duration> {
        if self.amount <= 0 {
            return None;
        }
        match self.unit {
            IntervalUnit::Hours => Duration::try_hours(self.amount),
            IntervalUnit::Days => Duration::try_days(self.amount),
        }
    }

    /// First cadence point strictly after `from`, counting whole steps from
    /// the anchor. `from` before the anchor yields the anchor itself.
    pub fn next_dose(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        let step = self.step()?;
        if from < self.starts_at {
            return Some(self.starts_at);
        }
        let step_secs = step.num_seconds();
        let elapsed_secs = (from - self.starts_at).num_seconds();
        let periods = elapsed_secs / step_secs + 1;
        let advance = Duration::try_seconds(step_secs.checked_mul(periods)?)?;
        self.starts_at.checked_add_signed(advance)
    }

    /// Due once past the anchor and within the tolerance window before the
    /// next cadence point.
    pub fn is_due_at(&self, instant: NaiveDateTime) -> bool {
        if instant < self.starts_at {
            return false;
        }
        match self.next_dose(instant) {
            Some(next) => next - instant <= Duration::minutes(DUE_TOLERANCE_MIN),
            None => false,
        }
    }

    /// Render as "Every 4 hours".
    pub fn describe(&self) -> String {
        let label = self.unit.label();
        if self.amount == 1 {
            format!("Every 1 {}", label)
        } else {
            format!("Every {} {}s", self.amount, label)
        }
    }
}
