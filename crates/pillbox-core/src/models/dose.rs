//! Dose log models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One recorded dose of a medication.
///
/// Rows are append-only; the history feeds reports and the as-needed
/// minimum-interval guard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoseEvent {
    /// Row id - 0 until inserted
    pub id: i64,
    /// Medication the dose was taken for
    pub medication_id: i64,
    /// Schedule the dose was recorded against, if any
    pub schedule_id: Option<i64>,
    /// When the dose was taken (wall-clock)
    pub taken_at: NaiveDateTime,
    /// Free-text notes ("half dose", "with dinner")
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: String,
}

impl DoseEvent {
    /// Create a new dose event.
    pub fn new(medication_id: i64, schedule_id: Option<i64>, taken_at: NaiveDateTime) -> Self {
        Self {
            id: 0,
            medication_id,
            schedule_id,
            taken_at,
            notes: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
