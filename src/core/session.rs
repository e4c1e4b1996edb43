//! Reconciliation session
//!
//! A [`Session`] owns the roster and the session-wide assessment book and
//! exposes the query surface consumers read from: identity listing,
//! assessment lookup and tabular rows, per-student results and visits, and
//! the mark-versus-mean comparison dataset.

use crate::core::codes::{import_codes, CodeImportSummary};
use crate::core::ingest::{IngestSummary, ResultIngestor};
use crate::core::participation::{ApplySummary, ParticipationExtractor, VisitApplier};
use crate::core::roster::{RosterRepository, RosterStore};
use crate::domain::assessment::{Assessment, AssessmentBook, ResultRow};
use crate::domain::ids::{AssessmentKey, StudentId};
use crate::domain::student::{parse_mark, Identity, StudentResult};
use crate::domain::visit::Visit;
use crate::domain::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default display name for result rows whose candidate did not resolve
pub const DEFAULT_UNRESOLVED_NAME: &str = "N/A";

/// One point of the mark-versus-mean comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPoint {
    /// Candidate identity of the row
    pub candidate: String,

    /// Mark in the assessment, 0.0 when not numeric
    pub assessment_mark: f64,

    /// Mean of the student's numeric marks, 0.0 when unknown
    pub mean_mark: f64,
}

/// Serializable view of a whole session
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub generated_at: DateTime<Utc>,
    pub unresolved_name: &'a str,
    pub identities: &'a [Identity],
    pub assessments: &'a AssessmentBook,
}

/// Roster plus every assessment ingested so far
#[derive(Debug, Clone)]
pub struct Session {
    roster: RosterStore,
    assessments: AssessmentBook,
    unresolved_name: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RosterStore::new())
    }
}

impl Session {
    /// Starts a session over `roster`
    pub fn new(roster: RosterStore) -> Self {
        Self {
            roster,
            assessments: AssessmentBook::new(),
            unresolved_name: DEFAULT_UNRESOLVED_NAME.to_string(),
        }
    }

    /// Sets the display name used for unresolved result rows
    pub fn with_unresolved_name(mut self, name: impl Into<String>) -> Self {
        self.unresolved_name = name.into();
        self
    }

    pub fn unresolved_name(&self) -> &str {
        &self.unresolved_name
    }

    pub fn roster(&self) -> &RosterStore {
        &self.roster
    }

    /// Ingests a result table (header first) and merges its assessments
    ///
    /// # Errors
    ///
    /// Structural errors abort before the roster or the book is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use unitrack::core::roster::RosterStore;
    /// use unitrack::core::session::Session;
    /// use unitrack::domain::{AssessmentKey, Identity, StudentId};
    ///
    /// let roster = RosterStore::from_identities(vec![Identity::new(
    ///     StudentId::new("1001").unwrap(),
    ///     "Ada Lovelace",
    ///     "ada@uni.ac.uk",
    ///     "Dr Babbage",
    /// )]);
    /// let mut session = Session::new(roster);
    ///
    /// let table = vec![
    ///     vec!["module", "ass", "candkey", "mark", "grade"],
    ///     vec!["CS101", "A1", "1001", "72", "A"],
    ///     vec!["CS101", "A1", "Q9", "55", "C"],
    /// ];
    /// session.ingest_results(&table).unwrap();
    /// session.ingest_results(&table).unwrap();
    ///
    /// let rows = session.assessment_rows(&AssessmentKey::new("CS101", "A1")).unwrap();
    /// assert_eq!(rows.len(), 2);
    /// assert_eq!(rows[0].name, "Ada Lovelace");
    /// assert_eq!(rows[1].name, "N/A");
    /// ```
    pub fn ingest_results<S: AsRef<str>>(&mut self, table: &[Vec<S>]) -> Result<IngestSummary> {
        let outcome = ResultIngestor::new().ingest_table(table, &mut self.roster)?;
        let added = self.assessments.merge(outcome.assessments);
        tracing::debug!(
            entries_added = added,
            assessments = self.assessments.len(),
            "Merged batch into session"
        );
        Ok(outcome.summary)
    }

    /// Registers anonymous codes from `(student number, code)` rows
    pub fn register_codes<S: AsRef<str>>(&mut self, rows: &[Vec<S>]) -> CodeImportSummary {
        import_codes(rows, &mut self.roster)
    }

    /// Extracts visits from a participation page and applies them
    ///
    /// # Errors
    ///
    /// Fails only if the extractor cannot be built.
    pub fn apply_participation(&mut self, module: &str, html: &str) -> Result<ApplySummary> {
        let extractor = ParticipationExtractor::new(module)?;
        Ok(VisitApplier::new().apply(module, extractor.extract(html), &mut self.roster))
    }

    /// All identities in roster order
    pub fn identities(&self) -> &[Identity] {
        self.roster.identities()
    }

    /// Identities whose label contains `pattern`, case-insensitively
    pub fn filter_identities(&self, pattern: &str) -> Vec<&Identity> {
        self.roster.filter(pattern).collect()
    }

    pub fn assessment(&self, module: &str, assessment: &str) -> Option<&Assessment> {
        self.assessments
            .get(&AssessmentKey::new(module, assessment))
    }

    pub fn assessments(&self) -> &AssessmentBook {
        &self.assessments
    }

    /// Rows of an assessment as (name, candidate id, mark, grade)
    pub fn assessment_rows(&self, key: &AssessmentKey) -> Option<Vec<ResultRow>> {
        self.assessments
            .get(key)
            .map(|assessment| assessment.rows(&self.unresolved_name))
    }

    /// Drops an assessment from the session
    pub fn remove_assessment(&mut self, key: &AssessmentKey) -> Option<Assessment> {
        self.assessments.remove(key)
    }

    pub fn student_results(&self, id: &StudentId) -> Option<&[StudentResult]> {
        self.roster.get(id).map(Identity::results)
    }

    pub fn student_visits(&self, id: &StudentId) -> Option<&[Visit]> {
        self.roster.get(id).map(Identity::visits)
    }

    /// Mark-versus-mean dataset for one assessment
    ///
    /// Each row pairs its mark with the mean of all numeric marks held by
    /// the resolved student.
    pub fn comparison_points(&self, key: &AssessmentKey) -> Option<Vec<ComparisonPoint>> {
        let assessment = self.assessments.get(key)?;

        let points = assessment
            .entries()
            .iter()
            .map(|entry| {
                let mean_mark = if entry.name.is_resolved() {
                    StudentId::new(entry.candidate.as_str())
                        .ok()
                        .and_then(|id| self.roster.get(&id))
                        .and_then(Identity::mean_mark)
                        .unwrap_or(0.0)
                } else {
                    0.0
                };

                ComparisonPoint {
                    candidate: entry.candidate.clone(),
                    assessment_mark: parse_mark(&entry.mark).unwrap_or(0.0),
                    mean_mark,
                }
            })
            .collect();

        Some(points)
    }

    /// Serializable view of the session
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            generated_at: Utc::now(),
            unresolved_name: &self.unresolved_name,
            identities: self.roster.identities(),
            assessments: &self.assessments,
        }
    }
}
