//! Medication summary report.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::db::{Database, DbResult};

/// Display format for computed and recorded times.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Summary of every active medication and its schedules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationReport {
    /// Export timestamp
    pub generated_at: String,
    /// One entry per (medication, schedule) pair
    pub entries: Vec<ReportEntry>,
}

/// Single report line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Person the medication belongs to
    pub person_name: String,
    /// Medication name
    pub medication_name: String,
    /// Dose strength as entered
    pub dosage: Option<String>,
    /// Schedule description; empty for medications with no attached schedule
    pub schedule: String,
    /// Computed next dose, if the schedule produces one
    pub next_dose: Option<String>,
    /// Total doses recorded for the medication
    pub doses_recorded: i64,
    /// Most recent recorded dose
    pub last_taken: Option<String>,
}

impl MedicationReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("person,medication,dosage,schedule,next_dose,doses_recorded,last_taken\n");

        // Lines
        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                escape_csv(&entry.person_name),
                escape_csv(&entry.medication_name),
                escape_csv(entry.dosage.as_deref().unwrap_or("")),
                escape_csv(&entry.schedule),
                entry.next_dose.as_deref().unwrap_or(""),
                entry.doses_recorded,
                entry.last_taken.as_deref().unwrap_or(""),
            ));
        }

        csv
    }
}

/// Medication summary exporter.
pub struct ReportExporter<'a> {
    db: &'a Database,
}

impl<'a> ReportExporter<'a> {
    /// Create a new report exporter.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Build the summary, computing next doses relative to `now`.
    pub fn export_summary(&self, now: NaiveDateTime) -> DbResult<MedicationReport> {
        let mut entries = Vec::new();

        for person in self.db.list_persons()? {
            for medication in self.db.list_medications_for_person(person.id, false)? {
                let doses_recorded = self.db.count_doses_for_medication(medication.id)?;
                let last_taken = self
                    .db
                    .last_dose_for_medication(medication.id)?
                    .map(|d| d.taken_at.format(TIME_FORMAT).to_string());

                let schedules: Vec<_> = self
                    .db
                    .list_schedules_for_medication(medication.id)?
                    .into_iter()
                    .filter(|r| r.active)
                    .collect();

                if schedules.is_empty() {
                    entries.push(ReportEntry {
                        person_name: person.name.clone(),
                        medication_name: medication.name.clone(),
                        dosage: medication.dosage.clone(),
                        schedule: String::new(),
                        next_dose: None,
                        doses_recorded,
                        last_taken: last_taken.clone(),
                    });
                    continue;
                }

                for rule in schedules {
                    entries.push(ReportEntry {
                        person_name: person.name.clone(),
                        medication_name: medication.name.clone(),
                        dosage: medication.dosage.clone(),
                        schedule: rule.describe(),
                        next_dose: rule
                            .compute_next_dose(now)
                            .map(|t| t.format(TIME_FORMAT).to_string()),
                        doses_recorded,
                        last_taken: last_taken.clone(),
                    });
                }
            }
        }

        Ok(MedicationReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            entries,
        })
    }
}
