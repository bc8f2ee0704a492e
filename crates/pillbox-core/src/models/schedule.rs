//! Schedule rule models.
//!
//! A `ScheduleRule` attaches one dosing pattern to a medication. The four
//! variants form a closed set, so they are modeled as an enum of plain
//! structs and dispatched by exhaustive matching rather than trait objects.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Minute-of-day offsets are always in `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A dosing schedule attached to a medication.
///
/// Detaching a schedule flips `active` instead of deleting the row, so dose
/// history recorded against it stays attributable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRule {
    /// Row id - 0 until inserted
    pub id: i64,
    /// Owning medication
    pub medication_id: i64,
    /// The dosing pattern
    pub kind: ScheduleKind,
    /// Inactive rules never produce next doses and are never due
    pub active: bool,
    /// Free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl ScheduleRule {
    /// Create a new active rule for a medication.
    pub fn new(medication_id: i64, kind: ScheduleKind) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            medication_id,
            kind,
            active: true,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// The persistence discriminator for this rule's variant.
    pub fn kind_tag(&self) -> &'static str {
        self.kind.tag()
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// The closed set of dosing patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Fixed times every day
    Daily(DailySchedule),
    /// Repeating cadence from an anchor time
    Interval(IntervalSchedule),
    /// Fixed time on selected weekdays
    Weekly(WeeklySchedule),
    /// No scheduled time; optionally rate-limited
    AsNeeded(AsNeededSchedule),
}

impl ScheduleKind {
    /// Discriminator tag stored in the database `kind` column.
    pub fn tag(&self) -> &'static str {
        match self {
            ScheduleKind::Daily(_) => "daily",
            ScheduleKind::Interval(_) => "interval",
            ScheduleKind::Weekly(_) => "weekly",
            ScheduleKind::AsNeeded(_) => "as_needed",
        }
    }
}

/// Fixed times every day, as minute-of-day offsets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailySchedule {
    /// Minute-of-day offsets, sorted ascending (invariant relied on by
    /// next-dose search)
    #[serde(default)]
    pub times: Vec<u16>,
}

impl DailySchedule {
    /// Create a daily schedule. Offsets are deduplicated, sorted, and
    /// out-of-range values discarded.
    pub fn new(mut times: Vec<u16>) -> Self {
        times.retain(|&t| t < MINUTES_PER_DAY);
        times.sort_unstable();
        times.dedup();
        Self { times }
    }
}

/// Unit for an interval schedule's repeat quantity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Hours,
    Days,
}

impl IntervalUnit {
    /// Parse a unit name, case-insensitive, singular or plural.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "hours" => Some(IntervalUnit::Hours),
            "day" | "days" => Some(IntervalUnit::Days),
            _ => None,
        }
    }

    /// Singular label for rendering.
    pub fn label(&self) -> &'static str {
        match self {
            IntervalUnit::Hours => "hour",
            IntervalUnit::Days => "day",
        }
    }

    /// Canonical tag, matching the serde encoding.
    pub fn tag(&self) -> &'static str {
        match self {
            IntervalUnit::Hours => "hours",
            IntervalUnit::Days => "days",
        }
    }
}

/// Repeating cadence: every `amount` `unit`s starting at `starts_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalSchedule {
    /// Repeat quantity; non-positive means not yet configured
    pub amount: i64,
    /// Repeat unit
    pub unit: IntervalUnit,
    /// Anchor time the cadence is computed from
    pub starts_at: NaiveDateTime,
}

impl IntervalSchedule {
    /// Create an interval schedule.
    pub fn new(amount: i64, unit: IntervalUnit, starts_at: NaiveDateTime) -> Self {
        Self {
            amount,
            unit,
            starts_at,
        }
    }

    /// A fresh, not-yet-configured schedule anchored at the current time.
    pub fn unconfigured() -> Self {
        Self::new(0, IntervalUnit::Hours, chrono::Utc::now().naive_utc())
    }
}

/// Day of the week, Monday-first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All days in week order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Parse a day name, case-insensitive, full or three-letter form.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Some(DayOfWeek::Monday),
            "tue" | "tues" | "tuesday" => Some(DayOfWeek::Tuesday),
            "wed" | "wednesday" => Some(DayOfWeek::Wednesday),
            "thu" | "thur" | "thurs" | "thursday" => Some(DayOfWeek::Thursday),
            "fri" | "friday" => Some(DayOfWeek::Friday),
            "sat" | "saturday" => Some(DayOfWeek::Saturday),
            "sun" | "sunday" => Some(DayOfWeek::Sunday),
            _ => None,
        }
    }

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Convert from chrono's weekday.
    pub fn from_chrono(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

/// Fixed time on selected weekdays.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WeeklySchedule {
    /// Scheduled weekdays, sorted in week order
    #[serde(default)]
    pub days: Vec<DayOfWeek>,
    /// Minute-of-day offset shared by all scheduled days
    #[serde(default)]
    pub time: u16,
}

impl WeeklySchedule {
    /// Create a weekly schedule. Days are deduplicated and sorted in week
    /// order; the time offset is clamped into range.
    pub fn new(mut days: Vec<DayOfWeek>, time: u16) -> Self {
        days.sort_unstable();
        days.dedup();
        Self {
            days,
            time: time.min(MINUTES_PER_DAY - 1),
        }
    }

    /// Whether the given weekday is scheduled.
    pub fn is_scheduled_day(&self, weekday: chrono::Weekday) -> bool {
        self.days.contains(&DayOfWeek::from_chrono(weekday))
    }
}

/// Take-as-needed, optionally rate-limited by a minimum spacing guard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AsNeededSchedule {
    /// Minimum hours between doses; `None` or 0 means unguarded
    pub min_hours_between: Option<i64>,
    /// When the last dose was taken
    pub last_taken: Option<NaiveDateTime>,
}

impl AsNeededSchedule {
    /// Create an as-needed schedule with an optional spacing guard.
    pub fn new(min_hours_between: Option<i64>) -> Self {
        Self {
            min_hours_between,
            last_taken: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_daily_times_sorted_and_deduped() {
        let daily = DailySchedule::new(vec![1200, 480, 480, 2000]);
        assert_eq!(daily.times, vec![480, 1200]); // 2000 out of range, dropped
    }

    #[test]
    fn test_weekly_days_normalized() {
        let weekly = WeeklySchedule::new(
            vec![DayOfWeek::Wednesday, DayOfWeek::Monday, DayOfWeek::Monday],
            540,
        );
        assert_eq!(weekly.days, vec![DayOfWeek::Monday, DayOfWeek::Wednesday]);
        assert_eq!(weekly.time, 540);
    }

    #[test]
    fn test_weekly_time_clamped() {
        let weekly = WeeklySchedule::new(vec![DayOfWeek::Monday], 5000);
        assert_eq!(weekly.time, MINUTES_PER_DAY - 1);
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ScheduleKind::Daily(DailySchedule::default()).tag(), "daily");
        assert_eq!(
            ScheduleKind::AsNeeded(AsNeededSchedule::default()).tag(),
            "as_needed"
        );
    }

    #[test]
    fn test_day_of_week_parse() {
        assert_eq!(DayOfWeek::parse("Monday"), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::parse("wed"), Some(DayOfWeek::Wednesday));
        assert_eq!(DayOfWeek::parse("SUN"), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::parse("noday"), None);
    }

    #[test]
    fn test_interval_unit_parse() {
        assert_eq!(IntervalUnit::parse("Hours"), Some(IntervalUnit::Hours));
        assert_eq!(IntervalUnit::parse("day"), Some(IntervalUnit::Days));
        assert_eq!(IntervalUnit::parse("weeks"), None);
    }

    #[test]
    fn test_interval_config_round_trip() {
        let starts_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let interval = IntervalSchedule::new(4, IntervalUnit::Hours, starts_at);

        let json = serde_json::to_string(&interval).unwrap();
        let back: IntervalSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, interval);
    }
}
