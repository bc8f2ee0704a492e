//! Due-dose scanning for the host app's notification poller.
//!
//! The scanner only answers queries; the host app decides when to poll and
//! whether to raise alerts.

use chrono::NaiveDateTime;

use crate::db::{Database, DbResult};
use crate::models::{Medication, Person, ScheduleRule};

/// A schedule that is due right now, with its owning records.
#[derive(Debug, Clone)]
pub struct DueEntry {
    pub person: Person,
    pub medication: Medication,
    pub schedule: ScheduleRule,
}

/// A computed future dose.
#[derive(Debug, Clone)]
pub struct UpcomingDose {
    pub person: Person,
    pub medication: Medication,
    pub schedule_id: i64,
    pub at: NaiveDateTime,
    pub description: String,
}

/// Scanner over all active schedules.
pub struct DueScanner<'a> {
    db: &'a Database,
}

impl<'a> DueScanner<'a> {
    /// Create a new scanner over the database.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// All schedules due at `instant`, joined with their medication and
    /// person. Archived medications and detached schedules never appear.
    pub fn due_at(&self, instant: NaiveDateTime) -> DbResult<Vec<DueEntry>> {
        let mut due = Vec::new();
        for (rule, medication, person) in self.attached_rules()? {
            if rule.is_due_at(instant) {
                due.push(DueEntry {
                    person,
                    medication,
                    schedule: rule,
                });
            }
        }
        Ok(due)
    }

    /// The next computed dose per active schedule after `from`, soonest
    /// first, at most `limit` entries.
    pub fn upcoming(&self, from: NaiveDateTime, limit: usize) -> DbResult<Vec<UpcomingDose>> {
        let mut upcoming = Vec::new();
        for (rule, medication, person) in self.attached_rules()? {
            if let Some(at) = rule.compute_next_dose(from) {
                upcoming.push(UpcomingDose {
                    person,
                    medication,
                    schedule_id: rule.id,
                    at,
                    description: rule.describe(),
                });
            }
        }
        upcoming.sort_by_key(|u| u.at);
        upcoming.truncate(limit);
        Ok(upcoming)
    }

    /// Active rules whose medication is still active, joined with owners.
    fn attached_rules(&self) -> DbResult<Vec<(ScheduleRule, Medication, Person)>> {
        let mut joined = Vec::new();
        for rule in self.db.list_active_schedules()? {
            if let Some(issue) = rule.misconfiguration() {
                tracing::debug!(
                    schedule_id = rule.id,
                    issue = ?issue,
                    "skipping misconfigured schedule"
                );
                continue;
            }
            let Some(medication) = self.db.get_medication(rule.medication_id)? else {
                continue;
            };
            if !medication.active {
                continue;
            }
            let Some(person) = self.db.get_person(medication.person_id)? else {
                continue;
            };
            joined.push((rule, medication, person));
        }
        Ok(joined)
    }
}
