//! Schedule rule database operations.
//!
//! Each rule is stored as a discriminator tag plus a JSON `config` column;
//! the tag picks which variant shape the config deserializes into.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{ScheduleKind, ScheduleRule};

impl Database {
    /// Insert a new schedule rule, returning the assigned row id.
    pub fn insert_schedule(&self, rule: &ScheduleRule) -> DbResult<i64> {
        let config_json = kind_config_json(&rule.kind)?;

        self.conn.execute(
            r#"
            INSERT INTO schedule_rules (
                medication_id, kind, config, active, notes, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                rule.medication_id,
                rule.kind_tag(),
                config_json,
                rule.active,
                rule.notes,
                rule.created_at,
                rule.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing rule's configuration, notes, and active flag.
    pub fn update_schedule(&self, rule: &ScheduleRule) -> DbResult<bool> {
        let config_json = kind_config_json(&rule.kind)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE schedule_rules SET
                kind = ?2,
                config = ?3,
                active = ?4,
                notes = ?5,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                rule.id,
                rule.kind_tag(),
                config_json,
                rule.active,
                rule.notes,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a schedule rule by id.
    pub fn get_schedule(&self, id: i64) -> DbResult<Option<ScheduleRule>> {
        self.conn
            .query_row(
                r#"
                SELECT id, medication_id, kind, config, active, notes, created_at, updated_at
                FROM schedule_rules
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(ScheduleRow {
                        id: row.get(0)?,
                        medication_id: row.get(1)?,
                        kind: row.get(2)?,
                        config: row.get(3)?,
                        active: row.get(4)?,
                        notes: row.get(5)?,
                        created_at: row.get(6)?,
                        updated_at: row.get(7)?,
                    })
                },
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List a medication's schedule rules, active first, newest last.
    pub fn list_schedules_for_medication(&self, medication_id: i64) -> DbResult<Vec<ScheduleRule>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, medication_id, kind, config, active, notes, created_at, updated_at
            FROM schedule_rules
            WHERE medication_id = ?
            ORDER BY active DESC, id
            "#,
        )?;

        let rows = stmt.query_map([medication_id], |row| {
            Ok(ScheduleRow {
                id: row.get(0)?,
                medication_id: row.get(1)?,
                kind: row.get(2)?,
                config: row.get(3)?,
                active: row.get(4)?,
                notes: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(row?.try_into()?);
        }
        Ok(rules)
    }

    /// List all active schedule rules (scanner input).
    pub fn list_active_schedules(&self) -> DbResult<Vec<ScheduleRule>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, medication_id, kind, config, active, notes, created_at, updated_at
            FROM schedule_rules
            WHERE active = 1
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ScheduleRow {
                id: row.get(0)?,
                medication_id: row.get(1)?,
                kind: row.get(2)?,
                config: row.get(3)?,
                active: row.get(4)?,
                notes: row.get(5)?,
                created_at: row.get(6)?,
                updated_at: row.get(7)?,
            })
        })?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(row?.try_into()?);
        }
        Ok(rules)
    }

    /// Detach a rule from its medication (soft delete) or re-attach it.
    pub fn set_schedule_active(&self, id: i64, active: bool) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE schedule_rules SET active = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, active],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a schedule rule outright.
    pub fn delete_schedule(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM schedule_rules WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

/// Serialize a variant's own fields for the config column.
fn kind_config_json(kind: &ScheduleKind) -> DbResult<String> {
    let json = match kind {
        ScheduleKind::Daily(s) => serde_json::to_string(s)?,
        ScheduleKind::Interval(s) => serde_json::to_string(s)?,
        ScheduleKind::Weekly(s) => serde_json::to_string(s)?,
        ScheduleKind::AsNeeded(s) => serde_json::to_string(s)?,
    };
    Ok(json)
}

/// Reconstruct a variant from the discriminator tag and config column.
fn kind_from_parts(tag: &str, config: &str) -> DbResult<ScheduleKind> {
    match tag {
        "daily" => Ok(ScheduleKind::Daily(serde_json::from_str(config)?)),
        "interval" => Ok(ScheduleKind::Interval(serde_json::from_str(config)?)),
        "weekly" => Ok(ScheduleKind::Weekly(serde_json::from_str(config)?)),
        "as_needed" => Ok(ScheduleKind::AsNeeded(serde_json::from_str(config)?)),
        other => Err(DbError::Constraint(format!(
            "unknown schedule kind: {}",
            other
        ))),
    }
}

/// Intermediate row struct for database mapping.
struct ScheduleRow {
    id: i64,
    medication_id: i64,
    kind: String,
    config: String,
    active: bool,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ScheduleRow> for ScheduleRule {
    type Error = DbError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        Ok(ScheduleRule {
            id: row.id,
            medication_id: row.medication_id,
            kind: kind_from_parts(&row.kind, &row.config)?,
            active: row.active,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AsNeededSchedule, DailySchedule, DayOfWeek, IntervalSchedule, IntervalUnit, Medication,
        Person, WeeklySchedule,
    };
    use chrono::NaiveDate;

    fn setup_db_with_medication() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let person_id = db.insert_person(&Person::new("Maria".into())).unwrap();
        let med_id = db
            .insert_medication(&Medication::new(person_id, "Amoxicillin".into()))
            .unwrap();
        (db, med_id)
    }

    #[test]
    fn test_round_trip_all_variants() {
        let (db, med_id) = setup_db_with_medication();

        let starts_at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let kinds = vec![
            ScheduleKind::Daily(DailySchedule::new(vec![480, 1200])),
            ScheduleKind::Interval(IntervalSchedule::new(4, IntervalUnit::Hours, starts_at)),
            ScheduleKind::Weekly(WeeklySchedule::new(
                vec![DayOfWeek::Monday, DayOfWeek::Wednesday],
                540,
            )),
            ScheduleKind::AsNeeded(AsNeededSchedule::new(Some(6))),
        ];

        for kind in kinds {
            let rule = ScheduleRule::new(med_id, kind.clone());
            let id = db.insert_schedule(&rule).unwrap();

            let loaded = db.get_schedule(id).unwrap().unwrap();
            assert_eq!(loaded.kind, kind);
            assert_eq!(loaded.medication_id, med_id);
            assert!(loaded.active);
        }
    }

    #[test]
    fn test_update_persists_config_changes() {
        let (db, med_id) = setup_db_with_medication();

        let mut rule = ScheduleRule::new(med_id, ScheduleKind::Daily(DailySchedule::default()));
        rule.id = db.insert_schedule(&rule).unwrap();

        rule.kind = ScheduleKind::Daily(DailySchedule::new(vec![480]));
        rule.notes = Some("before breakfast".into());
        assert!(db.update_schedule(&rule).unwrap());

        let loaded = db.get_schedule(rule.id).unwrap().unwrap();
        assert_eq!(
            loaded.kind,
            ScheduleKind::Daily(DailySchedule::new(vec![480]))
        );
        assert_eq!(loaded.notes, Some("before breakfast".into()));
    }

    #[test]
    fn test_detach_is_soft() {
        let (db, med_id) = setup_db_with_medication();

        let rule = ScheduleRule::new(med_id, ScheduleKind::Daily(DailySchedule::new(vec![480])));
        let id = db.insert_schedule(&rule).unwrap();

        assert!(db.set_schedule_active(id, false).unwrap());

        // Row still exists, flagged inactive
        let loaded = db.get_schedule(id).unwrap().unwrap();
        assert!(!loaded.active);

        // No longer part of the scanner's input
        assert!(db.list_active_schedules().unwrap().is_empty());
    }

    #[test]
    fn test_list_for_medication_orders_active_first() {
        let (db, med_id) = setup_db_with_medication();

        let rule = ScheduleRule::new(med_id, ScheduleKind::Daily(DailySchedule::new(vec![480])));
        let first = db.insert_schedule(&rule).unwrap();
        let second = db.insert_schedule(&rule).unwrap();
        db.set_schedule_active(first, false).unwrap();

        let rules = db.list_schedules_for_medication(med_id).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].id, second);
        assert!(!rules[1].active);
    }

    #[test]
    fn test_unknown_kind_is_constraint_error() {
        let err = kind_from_parts("fortnightly", "{}").unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
    }

    #[test]
    fn test_malformed_config_is_error() {
        // A bad stored interval unit must surface, not silently no-op
        let err = kind_from_parts(
            "interval",
            r#"{"amount":4,"unit":"weeks","starts_at":"2024-03-01T08:00:00"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DbError::Json(_)));
    }
}
