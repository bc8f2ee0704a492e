//! Person database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::Person;

impl Database {
    /// Insert a new person, returning the assigned row id.
    pub fn insert_person(&self, person: &Person) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO persons (name, date_of_birth, notes, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                person.name,
                person.date_of_birth,
                person.notes,
                person.created_at,
                person.updated_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing person.
    pub fn update_person(&self, person: &Person) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE persons SET
                name = ?2,
                date_of_birth = ?3,
                notes = ?4,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                person.id,
                person.name,
                person.date_of_birth,
                person.notes,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a person by id.
    pub fn get_person(&self, id: i64) -> DbResult<Option<Person>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, date_of_birth, notes, created_at, updated_at
                FROM persons
                WHERE id = ?
                "#,
                [id],
                |row| {
                    Ok(Person {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        date_of_birth: row.get(2)?,
                        notes: row.get(3)?,
                        created_at: row.get(4)?,
                        updated_at: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Search persons by name (prefix match).
    pub fn search_persons(&self, query: &str, limit: usize) -> DbResult<Vec<Person>> {
        let pattern = format!("{}%", query);
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, date_of_birth, notes, created_at, updated_at
            FROM persons
            WHERE name LIKE ?
            ORDER BY name
            LIMIT ?
            "#,
        )?;

        let rows = stmt.query_map(params![pattern, limit as i64], |row| {
            Ok(Person {
                id: row.get(0)?,
                name: row.get(1)?,
                date_of_birth: row.get(2)?,
                notes: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all persons.
    pub fn list_persons(&self) -> DbResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, date_of_birth, notes, created_at, updated_at
            FROM persons
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Person {
                id: row.get(0)?,
                name: row.get(1)?,
                date_of_birth: row.get(2)?,
                notes: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a person. Cascades to their medications and schedules.
    pub fn delete_person(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM persons WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
