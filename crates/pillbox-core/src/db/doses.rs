//! Dose log database operations.

use chrono::NaiveDateTime;
use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::DoseEvent;

/// Storage format for taken_at timestamps.
const TAKEN_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn format_taken_at(t: NaiveDateTime) -> String {
    t.format(TAKEN_AT_FORMAT).to_string()
}

fn parse_taken_at(s: &str) -> DbResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TAKEN_AT_FORMAT)
        .map_err(|_| DbError::Constraint(format!("bad taken_at timestamp: {}", s)))
}

impl Database {
    /// Append a dose event, returning the assigned row id.
    pub fn insert_dose(&self, dose: &DoseEvent) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO dose_log (medication_id, schedule_id, taken_at, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                dose.medication_id,
                dose.schedule_id,
                format_taken_at(dose.taken_at),
                dose.notes,
                dose.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List a medication's doses, most recent first.
    pub fn list_doses_for_medication(&self, medication_id: i64) -> DbResult<Vec<DoseEvent>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, medication_id, schedule_id, taken_at, notes, created_at
            FROM dose_log
            WHERE medication_id = ?
            ORDER BY taken_at DESC
            "#,
        )?;

        let rows = stmt.query_map([medication_id], |row| {
            Ok(DoseRow {
                id: row.get(0)?,
                medication_id: row.get(1)?,
                schedule_id: row.get(2)?,
                taken_at: row.get(3)?,
                notes: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut doses = Vec::new();
        for row in rows {
            doses.push(row?.try_into()?);
        }
        Ok(doses)
    }

    /// List every recorded dose, most recent first.
    pub fn list_all_doses(&self) -> DbResult<Vec<DoseEvent>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, medication_id, schedule_id, taken_at, notes, created_at
            FROM dose_log
            ORDER BY taken_at DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(DoseRow {
                id: row.get(0)?,
                medication_id: row.get(1)?,
                schedule_id: row.get(2)?,
                taken_at: row.get(3)?,
                notes: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;

        let mut doses = Vec::new();
        for row in rows {
            doses.push(row?.try_into()?);
        }
        Ok(doses)
    }

    /// Count a medication's recorded doses.
    pub fn count_doses_for_medication(&self, medication_id: i64) -> DbResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM dose_log WHERE medication_id = ?",
                [medication_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// The most recent dose for a medication, if any.
    pub fn last_dose_for_medication(&self, medication_id: i64) -> DbResult<Option<DoseEvent>> {
        self.conn
            .query_row(
                r#"
                SELECT id, medication_id, schedule_id, taken_at, notes, created_at
                FROM dose_log
                WHERE medication_id = ?
                ORDER BY taken_at DESC
                LIMIT 1
                "#,
                [medication_id],
                |row| {
                    Ok(DoseRow {
                        id: row.get(0)?,
                        medication_id: row.get(1)?,
                        schedule_id: row.get(2)?,
                        taken_at: row.get(3)?,
                        notes: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }
}

/// Intermediate row struct for database mapping.
struct DoseRow {
    id: i64,
    medication_id: i64,
    schedule_id: Option<i64>,
    taken_at: String,
    notes: Option<String>,
    created_at: String,
}

impl TryFrom<DoseRow> for DoseEvent {
    type Error = DbError;

    fn try_from(row: DoseRow) -> Result<Self, Self::Error> {
        Ok(DoseEvent {
            id: row.id,
            medication_id: row.medication_id,
            schedule_id: row.schedule_id,
            taken_at: parse_taken_at(&row.taken_at)?,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Medication, Person};
    use chrono::NaiveDate;

    fn dt(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn setup_db_with_medication() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let person_id = db.insert_person(&Person::new("Maria".into())).unwrap();
        let med_id = db
            .insert_medication(&Medication::new(person_id, "Amoxicillin".into()))
            .unwrap();
        (db, med_id)
    }

    #[test]
    fn test_insert_and_list() {
        let (db, med_id) = setup_db_with_medication();

        db.insert_dose(&DoseEvent::new(med_id, None, dt(1, 8))).unwrap();
        db.insert_dose(&DoseEvent::new(med_id, None, dt(1, 20))).unwrap();
        db.insert_dose(&DoseEvent::new(med_id, None, dt(2, 8))).unwrap();

        let doses = db.list_doses_for_medication(med_id).unwrap();
        assert_eq!(doses.len(), 3);
        // Most recent first
        assert_eq!(doses[0].taken_at, dt(2, 8));
        assert_eq!(doses[2].taken_at, dt(1, 8));
    }

    #[test]
    fn test_count_and_last() {
        let (db, med_id) = setup_db_with_medication();

        assert_eq!(db.count_doses_for_medication(med_id).unwrap(), 0);
        assert!(db.last_dose_for_medication(med_id).unwrap().is_none());

        db.insert_dose(&DoseEvent::new(med_id, None, dt(1, 8))).unwrap();
        db.insert_dose(&DoseEvent::new(med_id, None, dt(3, 8))).unwrap();

        assert_eq!(db.count_doses_for_medication(med_id).unwrap(), 2);
        let last = db.last_dose_for_medication(med_id).unwrap().unwrap();
        assert_eq!(last.taken_at, dt(3, 8));
    }

    #[test]
    fn test_schedule_reference_nulled_on_delete() {
        let (db, med_id) = setup_db_with_medication();

        db.conn()
            .execute(
                "INSERT INTO schedule_rules (medication_id, kind) VALUES (?, 'as_needed')",
                [med_id],
            )
            .unwrap();
        let schedule_id = db.conn().last_insert_rowid();

        db.insert_dose(&DoseEvent::new(med_id, Some(schedule_id), dt(1, 8)))
            .unwrap();
        db.delete_schedule(schedule_id).unwrap();

        let doses = db.list_doses_for_medication(med_id).unwrap();
        assert_eq!(doses.len(), 1);
        assert_eq!(doses[0].schedule_id, None);
    }

    #[test]
    fn test_taken_at_round_trip() {
        let t = dt(1, 8);
        assert_eq!(parse_taken_at(&format_taken_at(t)).unwrap(), t);
        assert!(parse_taken_at("not-a-time").is_err());
    }
}
