//! Medication database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::Medication;

fn medication_from_row(row: &Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(0)?,
        person_id: row.get(1)?,
        name: row.get(2)?,
        dosage: row.get(3)?,
        instructions: row.get(4)?,
        active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

impl Database {
    /// Insert a new medication, returning the assigned row id.
    pub fn insert_medication(&self, medication: &Medication) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medications (
                person_id, name, dosage, instructions, active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                medication.person_id,
                medication.name,
                medication.dosage,
                medication.instructions,
                medication.active,
                medication.created_at,
                medication.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing medication.
    pub fn update_medication(&self, medication: &Medication) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medications SET
                name = ?2,
                dosage = ?3,
                instructions = ?4,
                active = ?5,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                medication.id,
                medication.name,
                medication.dosage,
                medication.instructions,
                medication.active,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a medication by id.
    pub fn get_medication(&self, id: i64) -> DbResult<Option<Medication>> {
        self.conn
            .query_row(
                r#"
                SELECT id, person_id, name, dosage, instructions, active, created_at, updated_at
                FROM medications
                WHERE id = ?
                "#,
                [id],
                medication_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a person's medications, optionally including archived ones.
    pub fn list_medications_for_person(
        &self,
        person_id: i64,
        include_archived: bool,
    ) -> DbResult<Vec<Medication>> {
        let sql = if include_archived {
            r#"
            SELECT id, person_id, name, dosage, instructions, active, created_at, updated_at
            FROM medications
            WHERE person_id = ?
            ORDER BY name
            "#
        } else {
            r#"
            SELECT id, person_id, name, dosage, instructions, active, created_at, updated_at
            FROM medications
            WHERE person_id = ? AND active = 1
            ORDER BY name
            "#
        };

        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([person_id], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Search active medications using FTS5 (BM25 ranking).
    pub fn search_medications_fts(&self, query: &str, limit: usize) -> DbResult<Vec<Medication>> {
        let escaped_query = escape_fts_query(query);
        if escaped_query.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT m.id, m.person_id, m.name, m.dosage, m.instructions,
                   m.active, m.created_at, m.updated_at,
                   bm25(medications_fts) as rank
            FROM medications m
            JOIN medications_fts fts ON m.id = fts.rowid
            WHERE medications_fts MATCH ?
            AND m.active = 1
            ORDER BY rank
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![escaped_query, limit as i64], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Search active medications by name prefix (LIKE fallback).
    pub fn search_medications_prefix(&self, query: &str, limit: usize) -> DbResult<Vec<Medication>> {
        let pattern = format!("{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, person_id, name, dosage, instructions, active, created_at, updated_at
            FROM medications
            WHERE name LIKE ? AND active = 1
            ORDER BY name
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![pattern, limit as i64], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Mark a medication as archived (soft delete).
    pub fn set_medication_active(&self, id: i64, active: bool) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE medications SET active = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, active],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a medication. Cascades to its schedules and dose log.
    pub fn delete_medication(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medications WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

/// Escape special FTS5 characters and prepare query for prefix matching.
fn escape_fts_query(query: &str) -> String {
    let cleaned: String = query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| format!("{}*", word))
        .collect::<Vec<_>>()
        .join(" ")
}
