//! Medication models.

use serde::{Deserialize, Serialize};

/// A medication belonging to one person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    /// Row id - 0 until inserted
    pub id: i64,
    /// Owning person
    pub person_id: i64,
    /// Medication name (e.g., "Amoxicillin")
    pub name: String,
    /// Dose strength as entered (e.g., "200mg", "5mL")
    pub dosage: Option<String>,
    /// Free-text instructions ("take with food")
    pub instructions: Option<String>,
    /// Inactive medications are archived, never deleted
    pub active: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Medication {
    /// Create a new active medication with required fields.
    pub fn new(person_id: i64, name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            person_id,
            name,
            dosage: None,
            instructions: None,
            active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Display label combining name and dosage.
    pub fn display_label(&self) -> String {
        match &self.dosage {
            Some(dosage) => format!("{} {}", self.name, dosage),
            None => self.name.clone(),
        }
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
