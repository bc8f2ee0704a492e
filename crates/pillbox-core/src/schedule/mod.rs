//! Schedule-rule evaluation engine.
//!
//! Each variant answers three questions: the next dose strictly after a
//! point in time, whether a dose is due at an instant (within the variant's
//! tolerance window), and a human-readable description. All computations
//! are pure functions of the rule's stored configuration; "no result" is
//! always `None`, never a sentinel value.

mod as_needed;
mod daily;
mod interval;
mod weekly;
mod window;

pub use window::{at_minute, format_clock, minute_distance, minute_of_day, within_tolerance};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::{
    AsNeededSchedule, DailySchedule, IntervalSchedule, ScheduleKind, ScheduleRule, WeeklySchedule,
};

/// Schedule engine errors.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Unknown schedule kind: {0}")]
    UnknownKind(String),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// A configuration gap that makes a rule inert.
///
/// The public contract treats these as "no next dose / never due" rather
/// than errors, so an incompletely configured schedule does nothing instead
/// of crashing the host app. This diagnosis lets callers log the condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misconfiguration {
    /// Daily schedule with no times
    NoTimesConfigured,
    /// Weekly schedule with no weekdays
    NoWeekdaysConfigured,
    /// Interval schedule with a non-positive amount
    NonPositiveInterval,
}

impl ScheduleRule {
    /// Construct a fresh, empty rule for a medication from a kind tag.
    ///
    /// Tags are matched case-insensitively with `-` and `_` ignored; `prn`
    /// is accepted as an alias for `as_needed`. Unrecognized tags are an
    /// invalid-argument error, unlike incomplete configuration.
    pub fn from_kind_tag(tag: &str, medication_id: i64) -> ScheduleResult<Self> {
        let normalized: String = tag
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let kind = match normalized.as_str() {
            "daily" => ScheduleKind::Daily(DailySchedule::default()),
            "interval" => ScheduleKind::Interval(IntervalSchedule::unconfigured()),
            "weekly" => ScheduleKind::Weekly(WeeklySchedule::default()),
            "asneeded" | "prn" => ScheduleKind::AsNeeded(AsNeededSchedule::default()),
            _ => return Err(ScheduleError::UnknownKind(tag.to_string())),
        };
        Ok(ScheduleRule::new(medication_id, kind))
    }

    /// Next dose strictly after `from`.
    ///
    /// `None` when the rule is inactive, incompletely configured, or has
    /// nothing scheduled (as-needed past its guard).
    pub fn compute_next_dose(&self, from: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.active {
            return None;
        }
        match &self.kind {
            ScheduleKind::Daily(s) => s.next_dose(from),
            ScheduleKind::Interval(s) => s.next_dose(from),
            ScheduleKind::Weekly(s) => s.next_dose(from),
            ScheduleKind::AsNeeded(s) => s.next_dose(from),
        }
    }

    /// Whether a dose is due at `instant`, within the variant's tolerance
    /// window. Inactive rules are never due.
    pub fn is_due_at(&self, instant: NaiveDateTime) -> bool {
        if !self.active {
            return false;
        }
        match &self.kind {
            ScheduleKind::Daily(s) => s.is_due_at(instant),
            ScheduleKind::Interval(s) => s.is_due_at(instant),
            ScheduleKind::Weekly(s) => s.is_due_at(instant),
            ScheduleKind::AsNeeded(s) => s.is_due_at(instant),
        }
    }

    /// Human-readable rendering of the dosing pattern.
    pub fn describe(&self) -> String {
        match &self.kind {
            ScheduleKind::Daily(s) => s.describe(),
            ScheduleKind::Interval(s) => s.describe(),
            ScheduleKind::Weekly(s) => s.describe(),
            ScheduleKind::AsNeeded(s) => s.describe(),
        }
    }

    /// Record a dose taken at `taken_at`, returning the updated rule.
    ///
    /// Only as-needed rules carry dose state; other variants come back
    /// unchanged.
    #[must_use]
    pub fn with_dose_recorded(&self, taken_at: NaiveDateTime) -> Self {
        let mut rule = self.clone();
        if let ScheduleKind::AsNeeded(s) = &self.kind {
            rule.kind = ScheduleKind::AsNeeded(s.record_dose(taken_at));
            rule.touch();
        }
        rule
    }

    /// Diagnose configuration that makes this rule inert.
    ///
    /// Returns `None` for well-configured rules; as-needed rules are always
    /// well-configured.
    pub fn misconfiguration(&self) -> Option<Misconfiguration> {
        match &self.kind {
            ScheduleKind::Daily(s) if s.times.is_empty() => {
                Some(Misconfiguration::NoTimesConfigured)
            }
            ScheduleKind::Weekly(s) if s.days.is_empty() => {
                Some(Misconfiguration::NoWeekdaysConfigured)
            }
            ScheduleKind::Interval(s) if s.amount <= 0 => {
                Some(Misconfiguration::NonPositiveInterval)
            }
            _ => None,
        }
    }
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
    fn test_factory_tags() {
        for tag in ["daily", "Daily", "DAILY"] {
            let rule = ScheduleRule::from_kind_tag(tag, 1).unwrap();
            assert_eq!(rule.kind_tag(), "daily");
        }
        assert_eq!(
            ScheduleRule::from_kind_tag("interval", 1).unwrap().kind_tag(),
            "interval"
        );
        assert_eq!(
            ScheduleRule::from_kind_tag("Weekly", 1).unwrap().kind_tag(),
            "weekly"
        );
        for tag in ["asneeded", "as-needed", "as_needed", "PRN"] {
            let rule = ScheduleRule::from_kind_tag(tag, 1).unwrap();
            assert_eq!(rule.kind_tag(), "as_needed");
        }
    }

    #[test]
    fn test_factory_binds_medication() {
        let rule = ScheduleRule::from_kind_tag("daily", 42).unwrap();
        assert_eq!(rule.medication_id, 42);
        assert!(rule.active);
    }

    #[test]
    fn test_factory_rejects_unknown_tag() {
        let err = ScheduleRule::from_kind_tag("fortnightly", 1).unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownKind(ref tag) if tag == "fortnightly"));
    }

    #[test]
    fn test_inactive_rule_fails_closed() {
        let mut rule = ScheduleRule::new(
            1,
            ScheduleKind::Daily(crate::models::DailySchedule::new(vec![480])),
        );
        assert!(rule.compute_next_dose(dt(7, 0)).is_some());
        assert!(rule.is_due_at(dt(8, 0)));

        rule.active = false;
        assert_eq!(rule.compute_next_dose(dt(7, 0)), None);
        assert!(!rule.is_due_at(dt(8, 0)));
    }

    #[test]
    fn test_describe_distinguishes_variants() {
        let cases = [
            ("daily", "Daily"),
            ("interval", "Every"),
            ("weekly", "Weekly"),
            ("prn", "As needed"),
        ];
        for (tag, needle) in cases {
            let rule = ScheduleRule::from_kind_tag(tag, 1).unwrap();
            assert!(
                rule.describe().contains(needle),
                "{} should describe with {:?}, got {:?}",
                tag,
                needle,
                rule.describe()
            );
        }
    }

    #[test]
    fn test_with_dose_recorded_updates_as_needed_only() {
        let prn = ScheduleRule::from_kind_tag("prn", 1).unwrap();
        let logged = prn.with_dose_recorded(dt(8, 0));
        match &logged.kind {
            ScheduleKind::AsNeeded(s) => assert_eq!(s.last_taken, Some(dt(8, 0))),
            other => panic!("unexpected kind: {:?}", other),
        }

        let daily = ScheduleRule::from_kind_tag("daily", 1).unwrap();
        let unchanged = daily.with_dose_recorded(dt(8, 0));
        assert_eq!(unchanged.kind, daily.kind);
    }

    #[test]
    fn test_misconfiguration_diagnosis() {
        let empty_daily = ScheduleRule::from_kind_tag("daily", 1).unwrap();
        assert_eq!(
            empty_daily.misconfiguration(),
            Some(Misconfiguration::NoTimesConfigured)
        );

        let empty_weekly = ScheduleRule::from_kind_tag("weekly", 1).unwrap();
        assert_eq!(
            empty_weekly.misconfiguration(),
            Some(Misconfiguration::NoWeekdaysConfigured)
        );

        let empty_interval = ScheduleRule::from_kind_tag("interval", 1).unwrap();
        assert_eq!(
            empty_interval.misconfiguration(),
            Some(Misconfiguration::NonPositiveInterval)
        );

        let prn = ScheduleRule::from_kind_tag("prn", 1).unwrap();
        assert_eq!(prn.misconfiguration(), None);

        let configured = ScheduleRule::new(
            1,
            ScheduleKind::Daily(crate::models::DailySchedule::new(vec![480])),
        );
        assert_eq!(configured.misconfiguration(), None);
    }

    #[test]
    fn test_misconfigured_rules_do_nothing() {
        for tag in ["daily", "weekly", "interval"] {
            let rule = ScheduleRule::from_kind_tag(tag, 1).unwrap();
            assert_eq!(rule.compute_next_dose(dt(8, 0)), None, "{}", tag);
            assert!(!rule.is_due_at(dt(8, 0)), "{}", tag);
        }
    }
}
