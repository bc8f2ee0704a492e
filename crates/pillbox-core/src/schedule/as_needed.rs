//! As-needed schedule evaluation.

use chrono::{Duration, NaiveDateTime};

use crate::models::AsNeededSchedule;

impl AsNeededSchedule {
    /// The spacing guard as a duration, if one is configured and positive.
    fn guard(&self) -> Option<Duration> {
        self.min_hours_between
            .filter(|&h| h > 0)
            .and_then(Duration::try_hours)
    }

    /// The time the spacing guard next permits a dose. `None` means a dose
    /// may be taken now - there is no scheduled time by contract.
    pub fn next_dose(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        let guard = self.guard()?;
        let last = self.last_taken?;
        let allowed_at = last.checked_add_signed(guard)?;
        (allowed_at > from).then_some(allowed_at)
    }

    /// Due unless the spacing guard has not yet elapsed since the last dose.
    pub fn is_due_at(&self, instant: NaiveDateTime) -> bool {
        match (self.guard(), self.last_taken) {
            (Some(guard), Some(last)) => instant - last >= guard,
            _ => true,
        }
    }

    /// Record a dose taken at `taken_at`, returning the updated schedule.
    #[must_use]
    pub fn record_dose(&self, taken_at: NaiveDateTime) -> Self {
        Self {
            min_hours_between: self.min_hours_between,
            last_taken: Some(taken_at),
        }
    }

    /// Render as "As needed", with the spacing guard when configured.
    pub fn describe(&self) -> String {
        match self.min_hours_between.filter(|&h| h > 0) {
            Some(1) => "As needed (at least 1 hour between doses)".to_string(),
            Some(h) => format!("As needed (at least {} hours between doses)", h),
            None => "As needed".to_string(),
        }
    }
}
