//! Pillbox Core Library
//!
//! Local-first family medication tracker core: persons, medications, dosing
//! schedules, a dose log, due-dose scanning, and report export, exposed to
//! native mobile UIs over UniFFI.
//!
//! # Architecture
//!
//! ```text
//! UI (Swift/Kotlin)
//!        │ UniFFI
//!        ▼
//!   PillboxCore ───────► Database (SQLite)
//!        │                    │
//!        │     persons / medications / schedule_rules / dose_log
//!        │                    │
//!        ├── schedule engine (next dose, due check, describe)
//!        ├── DueScanner (polled by the host notification layer)
//!        ├── ranked search
//!        └── reports (CSV / JSON)
//! ```
//!
//! # Core Principle
//!
//! Schedule evaluation is pure: every answer is a function of the stored
//! configuration and the timestamp the caller passes in. The host app owns
//! timers, alerts, and navigation.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer with FTS5 search
//! - [`models`]: Domain types (Person, Medication, ScheduleRule, DoseEvent)
//! - [`schedule`]: Schedule-rule evaluation engine
//! - [`search`]: Ranked medication search
//! - [`reminders`]: Due-dose scanner
//! - [`export`]: Medication summary and dose history reports

pub mod db;
pub mod export;
pub mod models;
pub mod reminders;
pub mod schedule;
pub mod search;

// Re-export commonly used types
pub use db::Database;
pub use export::{DoseHistoryReport, HistoryExporter, MedicationReport, ReportExporter};
pub use models::{
    AsNeededSchedule, DailySchedule, DayOfWeek, DoseEvent, IntervalSchedule, IntervalUnit,
    Medication, Person, ScheduleKind, ScheduleRule, WeeklySchedule,
};
pub use reminders::{DueEntry, DueScanner, UpcomingDose};
pub use schedule::{Misconfiguration, ScheduleError};
pub use search::{MedicationMatch, MedicationSearch};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex};

use models::MINUTES_PER_DAY;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PillboxError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for PillboxError {
    fn from(e: db::DbError) -> Self {
        PillboxError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for PillboxError {
    fn from(e: serde_json::Error) -> Self {
        PillboxError::SerializationError(e.to_string())
    }
}

impl From<ScheduleError> for PillboxError {
    fn from(e: ScheduleError) -> Self {
        PillboxError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PillboxError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PillboxError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Timestamp helpers
// =========================================================================

/// Accepted FFI timestamp layouts, tried in order.
const FFI_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime(s: &str) -> Result<NaiveDateTime, PillboxError> {
    let trimmed = s.trim();
    for format in FFI_TIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(t);
        }
    }
    if let Ok(t) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(t.naive_utc());
    }
    Err(PillboxError::InvalidInput(format!(
        "unrecognized timestamp: {}",
        s
    )))
}

fn format_datetime(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<PillboxCore>, PillboxError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(PillboxCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<PillboxCore>, PillboxError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(PillboxCore {
        db: Arc::new(Mutex::new(db)),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PillboxCore {
    db: Arc<Mutex<Database>>,
}

#[uniffi::export]
impl PillboxCore {
    // =========================================================================
    // Person Operations
    // =========================================================================

    /// Create a new person.
    pub fn create_person(&self, name: String) -> Result<FfiPerson, PillboxError> {
        let db = self.db.lock()?;
        let mut person = Person::new(name);
        person.id = db.insert_person(&person)?;
        Ok(person.into())
    }

    /// Get a person by id.
    pub fn get_person(&self, person_id: i64) -> Result<Option<FfiPerson>, PillboxError> {
        let db = self.db.lock()?;
        let person = db.get_person(person_id)?;
        Ok(person.map(|p| p.into()))
    }

    /// List all persons.
    pub fn list_persons(&self) -> Result<Vec<FfiPerson>, PillboxError> {
        let db = self.db.lock()?;
        let persons = db.list_persons()?;
        Ok(persons.into_iter().map(|p| p.into()).collect())
    }

    /// Search persons by name prefix.
    pub fn search_persons(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPerson>, PillboxError> {
        let db = self.db.lock()?;
        let persons = db.search_persons(&query, limit as usize)?;
        Ok(persons.into_iter().map(|p| p.into()).collect())
    }

    /// Update a person's editable fields.
    pub fn update_person(&self, person: FfiPerson) -> Result<(), PillboxError> {
        let db = self.db.lock()?;
        let mut existing = db
            .get_person(person.id)?
            .ok_or_else(|| PillboxError::NotFound(format!("person {}", person.id)))?;
        existing.name = person.name;
        existing.date_of_birth = person.date_of_birth;
        existing.notes = person.notes;
        existing.touch();
        db.update_person(&existing)?;
        Ok(())
    }

    /// Delete a person and, by cascade, their medications and schedules.
    pub fn remove_person(&self, person_id: i64) -> Result<bool, PillboxError> {
        let db = self.db.lock()?;
        Ok(db.delete_person(person_id)?)
    }

    // =========================================================================
    // Medication Operations
    // =========================================================================

    /// Add a medication for a person.
    pub fn add_medication(
        &self,
        person_id: i64,
        name: String,
        dosage: Option<String>,
    ) -> Result<FfiMedication, PillboxError> {
        let db = self.db.lock()?;
        db.get_person(person_id)?
            .ok_or_else(|| PillboxError::NotFound(format!("person {}", person_id)))?;

        let mut medication = Medication::new(person_id, name);
        medication.dosage = dosage;
        medication.id = db.insert_medication(&medication)?;
        Ok(medication.into())
    }

    /// Get a medication by id.
    pub fn get_medication(
        &self,
        medication_id: i64,
    ) -> Result<Option<FfiMedication>, PillboxError> {
        let db = self.db.lock()?;
        let medication = db.get_medication(medication_id)?;
        Ok(medication.map(|m| m.into()))
    }

    /// List a person's medications.
    pub fn list_medications(
        &self,
        person_id: i64,
        include_archived: bool,
    ) -> Result<Vec<FfiMedication>, PillboxError> {
        let db = self.db.lock()?;
        let medications = db.list_medications_for_person(person_id, include_archived)?;
        Ok(medications.into_iter().map(|m| m.into()).collect())
    }

    /// Update a medication's editable fields.
    pub fn update_medication(&self, medication: FfiMedication) -> Result<(), PillboxError> {
        let db = self.db.lock()?;
        let mut existing = db
            .get_medication(medication.id)?
            .ok_or_else(|| PillboxError::NotFound(format!("medication {}", medication.id)))?;
        existing.name = medication.name;
        existing.dosage = medication.dosage;
        existing.instructions = medication.instructions;
        existing.active = medication.active;
        existing.touch();
        db.update_medication(&existing)?;
        Ok(())
    }

    /// Archive a medication (soft delete).
    pub fn archive_medication(&self, medication_id: i64) -> Result<bool, PillboxError> {
        let db = self.db.lock()?;
        Ok(db.set_medication_active(medication_id, false)?)
    }

    /// Ranked medication search across all persons.
    pub fn search_medications(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiMedicationMatch>, PillboxError> {
        let db = self.db.lock()?;
        let search = MedicationSearch::new(&db);
        let matches = search.search(&query, limit as usize)?;
        Ok(matches
            .into_iter()
            .map(|m| FfiMedicationMatch {
                medication: m.medication.into(),
                score: m.score,
            })
            .collect())
    }

    // =========================================================================
    // Schedule Operations
    // =========================================================================

    /// Attach a fresh schedule of the given kind to a medication.
    ///
    /// Accepted kinds: "daily", "interval", "weekly", "asneeded"/"as-needed"/
    /// "prn" (case-insensitive).
    pub fn add_schedule(
        &self,
        medication_id: i64,
        kind: String,
    ) -> Result<FfiScheduleRule, PillboxError> {
        let db = self.db.lock()?;
        db.get_medication(medication_id)?
            .ok_or_else(|| PillboxError::NotFound(format!("medication {}", medication_id)))?;

        let mut rule = ScheduleRule::from_kind_tag(&kind, medication_id)?;
        rule.id = db.insert_schedule(&rule)?;
        Ok(rule.into())
    }

    /// Get a schedule by id.
    pub fn get_schedule(
        &self,
        schedule_id: i64,
    ) -> Result<Option<FfiScheduleRule>, PillboxError> {
        let db = self.db.lock()?;
        let rule = db.get_schedule(schedule_id)?;
        Ok(rule.map(|r| r.into()))
    }

    /// List a medication's schedules, active first.
    pub fn list_schedules(
        &self,
        medication_id: i64,
    ) -> Result<Vec<FfiScheduleRule>, PillboxError> {
        let db = self.db.lock()?;
        let rules = db.list_schedules_for_medication(medication_id)?;
        Ok(rules.into_iter().map(|r| r.into()).collect())
    }

    /// Set the times of a daily schedule (minute-of-day offsets).
    pub fn set_daily_times(
        &self,
        schedule_id: i64,
        times: Vec<u16>,
    ) -> Result<FfiScheduleRule, PillboxError> {
        if let Some(&bad) = times.iter().find(|&&t| t >= MINUTES_PER_DAY) {
            return Err(PillboxError::InvalidInput(format!(
                "minute offset out of range: {}",
                bad
            )));
        }
        let db = self.db.lock()?;
        let mut rule = self.load_schedule(&db, schedule_id)?;
        if !matches!(rule.kind, ScheduleKind::Daily(_)) {
            return Err(PillboxError::InvalidInput(format!(
                "schedule {} is not a daily schedule",
                schedule_id
            )));
        }
        rule.kind = ScheduleKind::Daily(DailySchedule::new(times));
        rule.touch();
        db.update_schedule(&rule)?;
        Ok(rule.into())
    }

    /// Set the cadence of an interval schedule.
    pub fn set_interval(
        &self,
        schedule_id: i64,
        amount: i64,
        unit: String,
        starts_at: String,
    ) -> Result<FfiScheduleRule, PillboxError> {
        let unit = IntervalUnit::parse(&unit)
            .ok_or_else(|| PillboxError::InvalidInput(format!("unknown interval unit: {}", unit)))?;
        let starts_at = parse_datetime(&starts_at)?;

        let db = self.db.lock()?;
        let mut rule = self.load_schedule(&db, schedule_id)?;
        if !matches!(rule.kind, ScheduleKind::Interval(_)) {
            return Err(PillboxError::InvalidInput(format!(
                "schedule {} is not an interval schedule",
                schedule_id
            )));
        }
        rule.kind = ScheduleKind::Interval(IntervalSchedule::new(amount, unit, starts_at));
        rule.touch();
        db.update_schedule(&rule)?;
        Ok(rule.into())
    }

    /// Set the weekdays and time of a weekly schedule.
    pub fn set_weekly(
        &self,
        schedule_id: i64,
        days: Vec<String>,
        time_minutes: u16,
    ) -> Result<FfiScheduleRule, PillboxError> {
        if time_minutes >= MINUTES_PER_DAY {
            return Err(PillboxError::InvalidInput(format!(
                "minute offset out of range: {}",
                time_minutes
            )));
        }
        let mut parsed = Vec::with_capacity(days.len());
        for day in &days {
            parsed.push(DayOfWeek::parse(day).ok_or_else(|| {
                PillboxError::InvalidInput(format!("unknown weekday: {}", day))
            })?);
        }

        let db = self.db.lock()?;
        let mut rule = self.load_schedule(&db, schedule_id)?;
        if !matches!(rule.kind, ScheduleKind::Weekly(_)) {
            return Err(PillboxError::InvalidInput(format!(
                "schedule {} is not a weekly schedule",
                schedule_id
            )));
        }
        rule.kind = ScheduleKind::Weekly(WeeklySchedule::new(parsed, time_minutes));
        rule.touch();
        db.update_schedule(&rule)?;
        Ok(rule.into())
    }

    /// Set the minimum-hours spacing guard of an as-needed schedule.
    pub fn set_as_needed_guard(
        &self,
        schedule_id: i64,
        min_hours_between: Option<i64>,
    ) -> Result<FfiScheduleRule, PillboxError> {
        if matches!(min_hours_between, Some(h) if h < 0) {
            return Err(PillboxError::InvalidInput(
                "minimum hours between doses cannot be negative".into(),
            ));
        }
        let db = self.db.lock()?;
        let mut rule = self.load_schedule(&db, schedule_id)?;
        let ScheduleKind::AsNeeded(existing) = &rule.kind else {
            return Err(PillboxError::InvalidInput(format!(
                "schedule {} is not an as-needed schedule",
                schedule_id
            )));
        };
        // Keep the recorded last dose; only the guard changes
        let mut updated = existing.clone();
        updated.min_hours_between = min_hours_between;
        rule.kind = ScheduleKind::AsNeeded(updated);
        rule.touch();
        db.update_schedule(&rule)?;
        Ok(rule.into())
    }

    /// Update a schedule's notes.
    pub fn set_schedule_notes(
        &self,
        schedule_id: i64,
        notes: Option<String>,
    ) -> Result<FfiScheduleRule, PillboxError> {
        let db = self.db.lock()?;
        let mut rule = self.load_schedule(&db, schedule_id)?;
        rule.notes = notes;
        rule.touch();
        db.update_schedule(&rule)?;
        Ok(rule.into())
    }

    /// Detach a schedule from its medication (soft delete).
    pub fn detach_schedule(&self, schedule_id: i64) -> Result<bool, PillboxError> {
        let db = self.db.lock()?;
        Ok(db.set_schedule_active(schedule_id, false)?)
    }

    /// Human-readable description of a schedule.
    pub fn describe_schedule(&self, schedule_id: i64) -> Result<String, PillboxError> {
        let db = self.db.lock()?;
        let rule = self.load_schedule(&db, schedule_id)?;
        Ok(rule.describe())
    }

    /// Next dose strictly after `from`, if the schedule produces one.
    pub fn next_dose(
        &self,
        schedule_id: i64,
        from: String,
    ) -> Result<Option<String>, PillboxError> {
        let from = parse_datetime(&from)?;
        let db = self.db.lock()?;
        let rule = self.load_schedule(&db, schedule_id)?;
        Ok(rule.compute_next_dose(from).map(format_datetime))
    }

    /// Whether a dose is due at `at`, within the schedule's tolerance.
    pub fn is_due(&self, schedule_id: i64, at: String) -> Result<bool, PillboxError> {
        let at = parse_datetime(&at)?;
        let db = self.db.lock()?;
        let rule = self.load_schedule(&db, schedule_id)?;
        Ok(rule.is_due_at(at))
    }

    // =========================================================================
    // Dose Operations
    // =========================================================================

    /// Record a dose taken at `taken_at`.
    ///
    /// Appends to the dose log; when recorded against an as-needed schedule
    /// the rule's last-taken state advances so its spacing guard applies.
    pub fn record_dose(
        &self,
        medication_id: i64,
        schedule_id: Option<i64>,
        taken_at: String,
        notes: Option<String>,
    ) -> Result<FfiDoseEvent, PillboxError> {
        let taken_at = parse_datetime(&taken_at)?;
        let db = self.db.lock()?;
        db.get_medication(medication_id)?
            .ok_or_else(|| PillboxError::NotFound(format!("medication {}", medication_id)))?;

        if let Some(schedule_id) = schedule_id {
            let rule = self.load_schedule(&db, schedule_id)?;
            if matches!(rule.kind, ScheduleKind::AsNeeded(_)) {
                db.update_schedule(&rule.with_dose_recorded(taken_at))?;
            }
        }

        let mut dose = DoseEvent::new(medication_id, schedule_id, taken_at);
        dose.notes = notes;
        dose.id = db.insert_dose(&dose)?;
        Ok(dose.into())
    }

    /// List a medication's recorded doses, most recent first.
    pub fn list_doses(&self, medication_id: i64) -> Result<Vec<FfiDoseEvent>, PillboxError> {
        let db = self.db.lock()?;
        let doses = db.list_doses_for_medication(medication_id)?;
        Ok(doses.into_iter().map(|d| d.into()).collect())
    }

    // =========================================================================
    // Scanner Operations
    // =========================================================================

    /// All schedules due at `at`. The host notification layer polls this.
    pub fn due_medications(&self, at: String) -> Result<Vec<FfiDueEntry>, PillboxError> {
        let at = parse_datetime(&at)?;
        let db = self.db.lock()?;
        let scanner = DueScanner::new(&db);
        let due = scanner.due_at(at)?;
        Ok(due
            .into_iter()
            .map(|entry| FfiDueEntry {
                person_id: entry.person.id,
                person_name: entry.person.name,
                medication_id: entry.medication.id,
                medication_name: entry.medication.name,
                dosage: entry.medication.dosage,
                schedule_id: entry.schedule.id,
                description: entry.schedule.describe(),
            })
            .collect())
    }

    /// Soonest computed doses after `from`, one per active schedule.
    pub fn upcoming_doses(
        &self,
        from: String,
        limit: u32,
    ) -> Result<Vec<FfiUpcomingDose>, PillboxError> {
        let from = parse_datetime(&from)?;
        let db = self.db.lock()?;
        let scanner = DueScanner::new(&db);
        let upcoming = scanner.upcoming(from, limit as usize)?;
        Ok(upcoming
            .into_iter()
            .map(|u| FfiUpcomingDose {
                person_name: u.person.name,
                medication_id: u.medication.id,
                medication_name: u.medication.name,
                schedule_id: u.schedule_id,
                at: format_datetime(u.at),
                description: u.description,
            })
            .collect())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export the medication summary as JSON.
    pub fn export_summary_json(&self) -> Result<String, PillboxError> {
        let db = self.db.lock()?;
        let exporter = ReportExporter::new(&db);
        let report = exporter.export_summary(chrono::Utc::now().naive_utc())?;
        Ok(report.to_json()?)
    }

    /// Export the medication summary as CSV.
    pub fn export_summary_csv(&self) -> Result<String, PillboxError> {
        let db = self.db.lock()?;
        let exporter = ReportExporter::new(&db);
        let report = exporter.export_summary(chrono::Utc::now().naive_utc())?;
        Ok(report.to_csv())
    }

    /// Export the dose history as JSON.
    pub fn export_history_json(&self) -> Result<String, PillboxError> {
        let db = self.db.lock()?;
        let exporter = HistoryExporter::new(&db);
        let report = exporter.export_history()?;
        Ok(report.to_json()?)
    }

    /// Export the dose history as CSV.
    pub fn export_history_csv(&self) -> Result<String, PillboxError> {
        let db = self.db.lock()?;
        let exporter = HistoryExporter::new(&db);
        let report = exporter.export_history()?;
        Ok(report.to_csv())
    }
}

impl PillboxCore {
    /// Load a schedule or fail with NotFound.
    fn load_schedule(
        &self,
        db: &Database,
        schedule_id: i64,
    ) -> Result<ScheduleRule, PillboxError> {
        db.get_schedule(schedule_id)?
            .ok_or_else(|| PillboxError::NotFound(format!("schedule {}", schedule_id)))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe person.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPerson {
    pub id: i64,
    pub name: String,
    pub date_of_birth: Option<String>,
    pub notes: Option<String>,
}

impl From<Person> for FfiPerson {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            date_of_birth: person.date_of_birth,
            notes: person.notes,
        }
    }
}

/// FFI-safe medication.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedication {
    pub id: i64,
    pub person_id: i64,
    pub name: String,
    pub dosage: Option<String>,
    pub instructions: Option<String>,
    pub active: bool,
}

impl From<Medication> for FfiMedication {
    fn from(medication: Medication) -> Self {
        Self {
            id: medication.id,
            person_id: medication.person_id,
            name: medication.name,
            dosage: medication.dosage,
            instructions: medication.instructions,
            active: medication.active,
        }
    }
}

/// FFI-safe schedule rule, flattened across variants.
///
/// `kind` says which of the per-variant field groups is meaningful; the
/// others hold their empty defaults.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScheduleRule {
    pub id: i64,
    pub medication_id: i64,
    pub kind: String,
    pub active: bool,
    pub notes: Option<String>,
    pub description: String,
    pub daily_times: Vec<u16>,
    pub interval_amount: Option<i64>,
    pub interval_unit: Option<String>,
    pub interval_starts_at: Option<String>,
    pub weekly_days: Vec<String>,
    pub weekly_time_minutes: Option<u16>,
    pub min_hours_between: Option<i64>,
    pub last_taken: Option<String>,
}

impl From<ScheduleRule> for FfiScheduleRule {
    fn from(rule: ScheduleRule) -> Self {
        let mut ffi = Self {
            id: rule.id,
            medication_id: rule.medication_id,
            kind: rule.kind_tag().to_string(),
            active: rule.active,
            notes: rule.notes.clone(),
            description: rule.describe(),
            daily_times: Vec::new(),
            interval_amount: None,
            interval_unit: None,
            interval_starts_at: None,
            weekly_days: Vec::new(),
            weekly_time_minutes: None,
            min_hours_between: None,
            last_taken: None,
        };
        match rule.kind {
            ScheduleKind::Daily(s) => {
                ffi.daily_times = s.times;
            }
            ScheduleKind::Interval(s) => {
                ffi.interval_amount = Some(s.amount);
                ffi.interval_unit = Some(s.unit.tag().to_string());
                ffi.interval_starts_at = Some(format_datetime(s.starts_at));
            }
            ScheduleKind::Weekly(s) => {
                ffi.weekly_days = s.days.iter().map(|d| d.name().to_string()).collect();
                ffi.weekly_time_minutes = Some(s.time);
            }
            ScheduleKind::AsNeeded(s) => {
                ffi.min_hours_between = s.min_hours_between;
                ffi.last_taken = s.last_taken.map(format_datetime);
            }
        }
        ffi
    }
}

/// FFI-safe ranked search result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicationMatch {
    pub medication: FfiMedication,
    pub score: f64,
}

/// FFI-safe due entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDueEntry {
    pub person_id: i64,
    pub person_name: String,
    pub medication_id: i64,
    pub medication_name: String,
    pub dosage: Option<String>,
    pub schedule_id: i64,
    pub description: String,
}

/// FFI-safe upcoming dose.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUpcomingDose {
    pub person_name: String,
    pub medication_id: i64,
    pub medication_name: String,
    pub schedule_id: i64,
    pub at: String,
    pub description: String,
}

/// FFI-safe dose event.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoseEvent {
    pub id: i64,
    pub medication_id: i64,
    pub schedule_id: Option<i64>,
    pub taken_at: String,
    pub notes: Option<String>,
}

impl From<DoseEvent> for FfiDoseEvent {
    fn from(dose: DoseEvent) -> Self {
        Self {
            id: dose.id,
            medication_id: dose.medication_id,
            schedule_id: dose.schedule_id,
            taken_at: format_datetime(dose.taken_at),
            notes: dose.notes,
        }
    }
}
