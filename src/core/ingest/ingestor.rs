//! Result ingestion
//!
//! Turns the rows of a result export into per-student results and
//! per-(module, assessment) aggregates, resolving anonymous candidate codes
//! against the roster on the way.

use super::header::ColumnMap;
use super::summary::IngestSummary;
use crate::core::roster::RosterRepository;
use crate::domain::assessment::{AssessmentBook, CandidateName, ResultEntry};
use crate::domain::ids::AssessmentKey;
use crate::domain::student::StudentResult;
use crate::domain::{IngestError, Result};
use std::time::Instant;

/// Outcome of ingesting one batch
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Counters for the batch
    pub summary: IngestSummary,

    /// Assessments built from this batch alone
    pub assessments: AssessmentBook,
}

/// Converts result tables into roster mutations and assessment aggregates
#[derive(Debug, Clone, Default)]
pub struct ResultIngestor;

impl ResultIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Ingests a table whose first row is the header
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::EmptyInput`] when `table` has no rows, or any
    /// error from [`ResultIngestor::ingest`].
    pub fn ingest_table<S: AsRef<str>>(
        &self,
        table: &[Vec<S>],
        roster: &mut impl RosterRepository,
    ) -> Result<BatchOutcome> {
        let (header, rows) = table.split_first().ok_or(IngestError::EmptyInput)?;
        self.ingest(header, rows, roster)
    }

    /// Ingests `rows` described by `header`
    ///
    /// The header is resolved before any row is looked at, so a missing
    /// column leaves `roster` untouched. Rows too short to hold every
    /// column are skipped and counted as unresolved.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingColumn`] when the header lacks a
    /// required column.
    ///
    /// # Examples
    ///
    /// ```
    /// use unitrack::core::ingest::ResultIngestor;
    /// use unitrack::core::roster::RosterStore;
    /// use unitrack::domain::{Identity, StudentId};
    ///
    /// let mut roster = RosterStore::from_identities(vec![Identity::new(
    ///     StudentId::new("1001").unwrap(),
    ///     "Ada Lovelace",
    ///     "ada@uni.ac.uk",
    ///     "Dr Babbage",
    /// )]);
    ///
    /// let header = ["module", "ass", "candkey", "mark", "grade"];
    /// let rows = vec![vec!["CS101", "A1", "1001/1", "72", "A"]];
    ///
    /// let outcome = ResultIngestor::new().ingest(&header, &rows, &mut roster).unwrap();
    /// assert_eq!(outcome.summary.resolved, 1);
    /// assert_eq!(outcome.assessments.len(), 1);
    /// ```
    pub fn ingest<H, S>(
        &self,
        header: &[H],
        rows: &[Vec<S>],
        roster: &mut impl RosterRepository,
    ) -> Result<BatchOutcome>
    where
        H: AsRef<str>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let columns = ColumnMap::resolve(header)?;

        let mut summary = IngestSummary::new();
        let mut batch = AssessmentBook::new();

        for (index, row) in rows.iter().enumerate() {
            // +2: one for the header, one for 1-based numbering
            let line = index + 2;
            let Some(raw) = columns.extract(row) else {
                crate::log_row_skipped!(line, "row is shorter than the header");
                summary.record_skipped();
                continue;
            };

            let key = AssessmentKey::new(raw.module, raw.assessment);
            let resolved = roster
                .resolve_code(&raw.code)
                .map(|identity| (identity.id().clone(), identity.name().to_string()));

            let (candidate, name) = match resolved {
                Some((id, name)) => {
                    let result = StudentResult::new(key.label(), raw.mark.as_str(), raw.grade.as_str());
                    let added = roster.add_result(&id, result);
                    summary.record_resolved(added);
                    (id.into_inner(), CandidateName::Resolved(name))
                }
                None => {
                    tracing::debug!(line, code = %raw.code, "Candidate code did not resolve");
                    summary.record_unresolved();
                    (raw.code, CandidateName::Unresolved)
                }
            };

            batch
                .entry(key)
                .add_entry(ResultEntry::new(candidate, name, raw.mark, raw.grade));
        }

        summary.assessments = batch.len();
        let summary = summary.with_duration(start.elapsed());
        crate::log_batch_complete!("results", summary.total_rows, summary.duration);

        Ok(BatchOutcome {
            summary,
            assessments: batch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::roster::RosterStore;
    use crate::domain::{Identity, StudentId, UnitrackError};

    const HEADER: [&str; 5] = ["module", "ass", "candkey", "mark", "grade"];

    fn roster() -> RosterStore {
        let mut store = RosterStore::from_identities(vec![
            Identity::new(StudentId::new("1001").unwrap(), "Ada", "ada@uni.ac.uk", "T"),
            Identity::new(StudentId::new("1002").unwrap(), "Alan", "alan@uni.ac.uk", "T"),
        ]);
        store.register_anonymous_code("1002", "ANON-9");
        store
    }

    fn row(cells: [&str; 5]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_resolves_anonymous_code() {
        let mut store = roster();
        let rows = vec![row(["CS101", "A1", "ANON-9/3", "58", "C"])];
        let outcome = ResultIngestor::new().ingest(&HEADER, &rows, &mut store).unwrap();

        let assessment = outcome
            .assessments
            .get(&AssessmentKey::new("CS101", "A1"))
            .unwrap();
        assert_eq!(assessment.entries()[0].candidate, "1002");
        assert_eq!(
            assessment.entries()[0].name,
            CandidateName::Resolved("Alan".to_string())
        );

        let alan = store.get(&StudentId::new("1002").unwrap()).unwrap();
        assert_eq!(alan.results()[0].assessment, "CS101 A1");
        assert_eq!(alan.results()[0].mark, Some(58.0));
    }

    #[test]
    fn test_unresolved_keeps_raw_code() {
        let mut store = roster();
        let rows = vec![row(["CS101", "A1", "ZZZ/1", "40", "D"])];
        let outcome = ResultIngestor::new().ingest(&HEADER, &rows, &mut store).unwrap();

        assert_eq!(outcome.summary.unresolved, 1);
        assert_eq!(outcome.summary.resolved, 0);
        let entry = &outcome.assessments.iter().next().unwrap().entries()[0];
        assert_eq!(entry.candidate, "ZZZ");
        assert_eq!(entry.name, CandidateName::Unresolved);
    }

    #[test]
    fn test_missing_header_aborts_without_mutation() {
        let mut store = roster();
        let header = ["module", "ass", "candkey", "grade"];
        let rows = vec![vec!["CS101", "A1", "1001", "A"]];
        let err = ResultIngestor::new().ingest(&header, &rows, &mut store).unwrap_err();

        assert!(matches!(
            err,
            UnitrackError::Ingest(IngestError::MissingColumn { column: "mark" })
        ));
        assert!(store.identities().iter().all(|i| i.results().is_empty()));
    }

    #[test]
    fn test_short_row_skipped_and_counted() {
        let mut store = roster();
        let rows = vec![
            vec!["CS101".to_string(), "A1".to_string()],
            row(["CS101", "A1", "1001", "70", "A"]),
        ];
        let outcome = ResultIngestor::new().ingest(&HEADER, &rows, &mut store).unwrap();

        assert_eq!(outcome.summary.total_rows, 2);
        assert_eq!(outcome.summary.skipped_rows, 1);
        assert_eq!(outcome.summary.unresolved, 1);
        assert_eq!(outcome.summary.resolved, 1);
    }

    #[test]
    fn test_duplicate_rows_fold_within_batch() {
        let mut store = roster();
        let rows = vec![
            row(["CS101", "A1", "1001", "70", "A"]),
            row(["CS101", "A1", "1001/2", "70", "A"]),
        ];
        let outcome = ResultIngestor::new().ingest(&HEADER, &rows, &mut store).unwrap();

        assert_eq!(outcome.summary.resolved, 2);
        assert_eq!(outcome.summary.student_results_added, 1);
        assert_eq!(outcome.assessments.iter().next().unwrap().len(), 1);
        assert_eq!(store.get(&StudentId::new("1001").unwrap()).unwrap().results().len(), 1);
    }

    #[test]
    fn test_ingest_table_requires_header() {
        let mut store = roster();
        let table: Vec<Vec<String>> = Vec::new();
        let err = ResultIngestor::new()
            .ingest_table(&table, &mut store)
            .unwrap_err();
        assert!(matches!(err, UnitrackError::Ingest(IngestError::EmptyInput)));
    }

    #[test]
    fn test_ingest_table_splits_header() {
        let mut store = roster();
        let table = vec![
            row(["\"Module\"", "\"Ass\"", "\"#CandKey\"", "\"Mark\"", "\"Grade\""]),
            row(["CS101", "A1", "1001", "70", "A"]),
        ];
        let outcome = ResultIngestor::new().ingest_table(&table, &mut store).unwrap();
        assert_eq!(outcome.summary.total_rows, 1);
        assert_eq!(outcome.summary.resolved, 1);
    }
}
