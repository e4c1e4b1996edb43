//! Ingestion summary and reporting

use serde::Serialize;
use std::time::Duration;

/// Counters for one ingested result batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestSummary {
    /// Data rows seen (header excluded)
    pub total_rows: usize,

    /// Rows whose candidate code resolved to a roster identity
    pub resolved: usize,

    /// Rows left unresolved, including skipped rows
    pub unresolved: usize,

    /// Rows skipped because they were too short
    pub skipped_rows: usize,

    /// Results newly attached to identities (duplicates excluded)
    pub student_results_added: usize,

    /// Assessments touched by the batch
    pub assessments: usize,

    /// SHA-256 of the source, when ingested from a file
    pub source_fingerprint: Option<String>,

    /// Duration of the ingestion
    #[serde(skip)]
    pub duration: Duration,
}

impl IngestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the fingerprint of the source file
    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.source_fingerprint = Some(fingerprint.into());
        self
    }

    pub(crate) fn record_resolved(&mut self, result_added: bool) {
        self.total_rows += 1;
        self.resolved += 1;
        if result_added {
            self.student_results_added += 1;
        }
    }

    pub(crate) fn record_unresolved(&mut self) {
        self.total_rows += 1;
        self.unresolved += 1;
    }

    pub(crate) fn record_skipped(&mut self) {
        self.record_unresolved();
        self.skipped_rows += 1;
    }

    /// Percentage of rows that resolved to an identity
    pub fn resolution_rate(&self) -> f64 {
        if self.total_rows == 0 {
            return 100.0;
        }
        (self.resolved as f64 / self.total_rows as f64) * 100.0
    }

    /// Operator-facing one-line report
    pub fn message(&self) -> String {
        format!(
            "In total there were {} de-anonymised results and {} unidentified results.",
            self.resolved, self.unresolved
        )
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_rows = self.total_rows,
            resolved = self.resolved,
            unresolved = self.unresolved,
            skipped_rows = self.skipped_rows,
            student_results_added = self.student_results_added,
            assessments = self.assessments,
            duration_ms = self.duration.as_millis() as u64,
            resolution_rate = format!("{:.2}%", self.resolution_rate()),
            "Result batch ingested"
        );

        if self.skipped_rows > 0 {
            tracing::warn!(
                skipped_rows = self.skipped_rows,
                "Result batch contained rows too short to ingest"
            );
        }
    }
}
