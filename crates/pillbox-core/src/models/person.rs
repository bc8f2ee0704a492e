//! Person models.

use serde::{Deserialize, Serialize};

/// A family member whose medications are tracked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    /// Row id - 0 until inserted
    pub id: i64,
    /// Display name
    pub name: String,
    /// Date of birth (ISO date string)
    pub date_of_birth: Option<String>,
    /// Additional notes (allergies, pediatrician, ...)
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Person {
    /// Create a new person with required fields.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: 0,
            name,
            date_of_birth: None,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Check if this person has been persisted.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
