//! SQLite schema definition.

/// Complete database schema for pillbox.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Persons
-- ============================================================================

CREATE TABLE IF NOT EXISTS persons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date_of_birth TEXT,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_persons_name ON persons(name);

-- ============================================================================
-- Medications
-- ============================================================================

CREATE TABLE IF NOT EXISTS medications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES persons(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    dosage TEXT,
    instructions TEXT,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_medications_person ON medications(person_id);
CREATE INDEX IF NOT EXISTS idx_medications_name ON medications(name);

-- FTS5 virtual table for full-text search
CREATE VIRTUAL TABLE IF NOT EXISTS medications_fts USING fts5(
    name,
    instructions,
    content='medications',
    content_rowid='id'
);

-- Triggers to keep FTS5 in sync with main table
CREATE TRIGGER IF NOT EXISTS medications_ai AFTER INSERT ON medications BEGIN
    INSERT INTO medications_fts(rowid, name, instructions)
    VALUES (new.id, new.name, coalesce(new.instructions, ''));
END;

CREATE TRIGGER IF NOT EXISTS medications_ad AFTER DELETE ON medications BEGIN
    INSERT INTO medications_fts(medications_fts, rowid, name, instructions)
    VALUES ('delete', old.id, old.name, coalesce(old.instructions, ''));
END;

CREATE TRIGGER IF NOT EXISTS medications_au AFTER UPDATE ON medications BEGIN
    INSERT INTO medications_fts(medications_fts, rowid, name, instructions)
    VALUES ('delete', old.id, old.name, coalesce(old.instructions, ''));
    INSERT INTO medications_fts(rowid, name, instructions)
    VALUES (new.id, new.name, coalesce(new.instructions, ''));
END;

-- ============================================================================
-- Schedule Rules
-- ============================================================================

-- One row per dosing pattern. `kind` is the discriminator that picks the
-- variant shape stored in the `config` JSON column. Detached rules keep
-- their row with active = 0.
CREATE TABLE IF NOT EXISTS schedule_rules (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    medication_id INTEGER NOT NULL REFERENCES medications(id) ON DELETE CASCADE,
    kind TEXT NOT NULL CHECK (kind IN ('daily', 'interval', 'weekly', 'as_needed')),
    config TEXT NOT NULL DEFAULT '{}',
    active INTEGER NOT NULL DEFAULT 1,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_schedules_medication ON schedule_rules(medication_id);
CREATE INDEX IF NOT EXISTS idx_schedules_active ON schedule_rules(active);

-- ============================================================================
-- Dose Log (Append-Only)
-- ============================================================================

CREATE TABLE IF NOT EXISTS dose_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    medication_id INTEGER NOT NULL REFERENCES medications(id) ON DELETE CASCADE,
    schedule_id INTEGER REFERENCES schedule_rules(id) ON DELETE SET NULL,
    taken_at TEXT NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_dose_log_medication ON dose_log(medication_id);
CREATE INDEX IF NOT EXISTS idx_dose_log_taken_at ON dose_log(taken_at);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_fts_trigger() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute("INSERT INTO persons (name) VALUES ('Maria')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO medications (person_id, name, instructions) VALUES (1, 'Amoxicillin 200mg', 'take with food')",
            [],
        )
        .unwrap();

        // Search via FTS
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM medications_fts WHERE medications_fts MATCH 'amoxicillin'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);

        // Search instructions
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM medications_fts WHERE medications_fts MATCH 'food'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_schedule_kind_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute("INSERT INTO persons (name) VALUES ('Maria')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO medications (person_id, name) VALUES (1, 'Amoxicillin')",
            [],
        )
        .unwrap();

        // Unknown discriminator should fail
        let result = conn.execute(
            "INSERT INTO schedule_rules (medication_id, kind) VALUES (1, 'fortnightly')",
            [],
        );
        assert!(result.is_err());

        // Known discriminator should succeed
        let result = conn.execute(
            "INSERT INTO schedule_rules (medication_id, kind) VALUES (1, 'daily')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_cascade_delete() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute("INSERT INTO persons (name) VALUES ('Maria')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO medications (person_id, name) VALUES (1, 'Amoxicillin')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO schedule_rules (medication_id, kind) VALUES (1, 'daily')",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM persons WHERE id = 1", []).unwrap();

        let medications: i64 = conn
            .query_row("SELECT COUNT(*) FROM medications", [], |row| row.get(0))
            .unwrap();
        let schedules: i64 = conn
            .query_row("SELECT COUNT(*) FROM schedule_rules", [], |row| row.get(0))
            .unwrap();
        assert_eq!(medications, 0);
        assert_eq!(schedules, 0);
    }
}
