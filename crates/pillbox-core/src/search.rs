//! Ranked medication search.
//!
//! FTS5 retrieves candidates; string similarity orders them so "amoxcillin"
//! still surfaces Amoxicillin near the top of the search box.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::db::{Database, DbResult};
use crate::models::Medication;

/// Number of candidates to retrieve from FTS5.
const FTS_CANDIDATE_LIMIT: usize = 20;

/// Minimum similarity to be included in results.
const MIN_SCORE: f64 = 0.30;

/// A medication with its search relevance score.
#[derive(Debug, Clone)]
pub struct MedicationMatch {
    pub medication: Medication,
    /// Similarity to the query (0.0 - 1.0)
    pub score: f64,
}

/// Ranked search over active medications.
pub struct MedicationSearch<'a> {
    db: &'a Database,
}

impl<'a> MedicationSearch<'a> {
    /// Create a new search over the database.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Search medications by name, best match first.
    pub fn search(&self, query: &str, limit: usize) -> DbResult<Vec<MedicationMatch>> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Ok(Vec::new());
        }

        let mut candidates = self.db.search_medications_fts(&query_lower, FTS_CANDIDATE_LIMIT)?;
        if candidates.is_empty() {
            // Misspellings miss the FTS index; fall back to a prefix scan
            candidates = self
                .db
                .search_medications_prefix(&query_lower, FTS_CANDIDATE_LIMIT)?;
        }

        let mut matches: Vec<MedicationMatch> = candidates
            .into_iter()
            .map(|medication| {
                let score = score_name(&query_lower, &medication.name);
                MedicationMatch { medication, score }
            })
            .filter(|m| m.score >= MIN_SCORE)
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(limit);
        Ok(matches)
    }
}

/// Score name match quality (0.0 - 1.0).
fn score_name(query: &str, name: &str) -> f64 {
    let name_lower = name.to_lowercase();
    if name_lower == query {
        return 1.0;
    }
    if name_lower.contains(query) {
        return 0.95;
    }
    jaro_winkler(query, &name_lower).max(normalized_levenshtein(query, &name_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();
        let person_id = db.insert_person(&Person::new("Maria".into())).unwrap();

        for name in ["Amoxicillin 200mg", "Ibuprofen 400mg", "Cetirizine 10mg"] {
            db.insert_medication(&Medication::new(person_id, name.into()))
                .unwrap();
        }
        db
    }

    #[test]
    fn test_exact_name_ranks_first() {
        let db = setup_db();
        let search = MedicationSearch::new(&db);

        let results = search.search("amoxicillin", 10).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].medication.name, "Amoxicillin 200mg");
        assert!(results[0].score > 0.9);
    }

    #[test]
    fn test_prefix_query() {
        let db = setup_db();
        let search = MedicationSearch::new(&db);

        let results = search.search("ibu", 10).unwrap();
        assert_eq!(results[0].medication.name, "Ibuprofen 400mg");
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let db = setup_db();
        let search = MedicationSearch::new(&db);
        assert!(search.search("   ", 10).unwrap().is_empty());
    }

    #[test]
    fn test_limit_respected() {
        let db = setup_db();
        let search = MedicationSearch::new(&db);

        let results = search.search("mg", 1).unwrap();
        assert!(results.len() <= 1);
    }

    #[test]
    fn test_score_name() {
        assert_eq!(score_name("amoxicillin", "Amoxicillin"), 1.0);
        assert_eq!(score_name("amox", "Amoxicillin 200mg"), 0.95);
        assert!(score_name("amoxcillin", "Amoxicillin") > 0.8);
        assert!(score_name("xyz", "Amoxicillin") < 0.6);
    }
}
