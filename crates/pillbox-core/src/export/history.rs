//! Dose history export.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::db::{Database, DbResult};

/// Display format for recorded times.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Full dose history, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseHistoryReport {
    /// Export timestamp
    pub generated_at: String,
    /// One entry per recorded dose
    pub entries: Vec<DoseHistoryEntry>,
}

/// Single recorded dose with its owning records resolved to names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseHistoryEntry {
    /// Person the medication belongs to
    pub person_name: String,
    /// Medication name
    pub medication_name: String,
    /// Dose strength as entered
    pub dosage: Option<String>,
    /// When the dose was taken
    pub taken_at: String,
    /// Free-text notes recorded with the dose
    pub notes: Option<String>,
}

impl DoseHistoryReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        // Header
        csv.push_str("person,medication,dosage,taken_at,notes\n");

        // Lines
        for entry in &self.entries {
            csv.push_str(&format!(
                "{},{},{},{},{}\n",
                escape_csv(&entry.person_name),
                escape_csv(&entry.medication_name),
                escape_csv(entry.dosage.as_deref().unwrap_or("")),
                entry.taken_at,
                escape_csv(entry.notes.as_deref().unwrap_or("")),
            ));
        }

        csv
    }
}

/// Dose history exporter.
pub struct HistoryExporter<'a> {
    db: &'a Database,
}

impl<'a> HistoryExporter<'a> {
    /// Create a new history exporter.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Build the full dose history.
    pub fn export_history(&self) -> DbResult<DoseHistoryReport> {
        let mut entries = Vec::new();

        for dose in self.db.list_all_doses()? {
            let Some(medication) = self.db.get_medication(dose.medication_id)? else {
                continue;
            };
            let Some(person) = self.db.get_person(medication.person_id)? else {
                continue;
            };

            entries.push(DoseHistoryEntry {
                person_name: person.name,
                medication_name: medication.name,
                dosage: medication.dosage,
                taken_at: dose.taken_at.format(TIME_FORMAT).to_string(),
                notes: dose.notes,
            });
        }

        Ok(DoseHistoryReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DoseEvent, Medication, Person};
    use chrono::NaiveDate;

    fn setup() -> Database {
        let db = Database::open_in_memory().unwrap();
        let person_id = db.insert_person(&Person::new("Maria".into())).unwrap();

        let mut med = Medication::new(person_id, "Ibuprofen".into());
        med.dosage = Some("400mg".into());
        let med_id = db.insert_medication(&med).unwrap();

        for (day, hour) in [(1, 8), (1, 20), (2, 9)] {
            let taken_at = NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap();
            let mut dose = DoseEvent::new(med_id, None, taken_at);
            if day == 2 {
                dose.notes = Some("headache".into());
            }
            db.insert_dose(&dose).unwrap();
        }
        db
    }

    #[test]
    fn test_history_entries_most_recent_first() {
        let db = setup();
        let report = HistoryExporter::new(&db).export_history().unwrap();

        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[0].taken_at, "2024-03-02 09:00");
        assert_eq!(report.entries[0].notes, Some("headache".into()));
        assert_eq!(report.entries[2].taken_at, "2024-03-01 08:00");
    }

    #[test]
    fn test_history_csv() {
        let db = setup();
        let report = HistoryExporter::new(&db).export_history().unwrap();

        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 4); // Header + 3 doses
        assert!(lines[0].contains("taken_at"));
        assert!(lines[1].contains("Ibuprofen"));
        assert!(lines[1].contains("headache"));
    }
}
