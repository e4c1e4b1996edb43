//! Anonymous marking code import
//!
//! Code files map a student number to the anonymous code the student sat
//! an exam under, one `(student number, code)` pair per row. Numbers are
//! matched against the roster the same way an operator search is: exact
//! id first, then a case-insensitive label match.

use crate::core::ingest::header::strip_noise;
use crate::core::roster::{CodeRegistration, RosterRepository};
use serde::Serialize;
use std::time::{Duration, Instant};

const STUDENT_NUMBER: usize = 0;
const ANONYMOUS_CODE: usize = 1;

/// Counters for one code import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CodeImportSummary {
    /// Codes attached to an identity
    pub imported: usize,

    /// Codes already owned by an identity; the first registration was kept
    pub duplicates: usize,

    /// Rows that matched no identity or were incomplete
    pub missing: usize,

    #[serde(skip)]
    pub duration: Duration,
}

impl CodeImportSummary {
    pub fn total(&self) -> usize {
        self.imported + self.duplicates + self.missing
    }

    /// Operator-facing one-line report
    pub fn message(&self) -> String {
        format!(
            "In total there were {} codes successfully imported and {} codes that did not match any loaded student.",
            self.imported, self.missing
        )
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            imported = self.imported,
            duplicates = self.duplicates,
            missing = self.missing,
            duration_ms = self.duration.as_millis() as u64,
            "Anonymous codes imported"
        );
    }
}

/// Registers every `(student number, code)` row on the roster
///
/// # Examples
///
/// ```
/// use unitrack::core::codes::import_codes;
/// use unitrack::core::roster::{RosterRepository, RosterStore};
/// use unitrack::domain::{Identity, StudentId};
///
/// let mut roster = RosterStore::from_identities(vec![Identity::new(
///     StudentId::new("1001").unwrap(),
///     "Ada Lovelace",
///     "ada@uni.ac.uk",
///     "Dr Babbage",
/// )]);
///
/// let rows = vec![vec!["1001", "X-42"], vec!["9999", "X-43"]];
/// let summary = import_codes(&rows, &mut roster);
///
/// assert_eq!(summary.imported, 1);
/// assert_eq!(summary.missing, 1);
/// assert_eq!(roster.resolve_code("X-42").unwrap().name(), "Ada Lovelace");
/// ```
pub fn import_codes<S: AsRef<str>>(
    rows: &[Vec<S>],
    roster: &mut impl RosterRepository,
) -> CodeImportSummary {
    let start = Instant::now();
    let mut summary = CodeImportSummary::default();

    for (index, row) in rows.iter().enumerate() {
        let cell = |i: usize| row.get(i).map(|c| strip_noise(c.as_ref())).unwrap_or_default();
        let number = cell(STUDENT_NUMBER);
        let code = cell(ANONYMOUS_CODE);

        if number.is_empty() || code.is_empty() {
            crate::log_row_skipped!(index + 1, "student number or code is blank");
            summary.missing += 1;
            continue;
        }

        match roster.register_anonymous_code(&number, &code) {
            CodeRegistration::Registered(_) => summary.imported += 1,
            CodeRegistration::AlreadyRegistered(owner) => {
                tracing::warn!(
                    code = %code,
                    owner = %owner,
                    student_number = %number,
                    "Anonymous code already registered, keeping first owner"
                );
                summary.duplicates += 1;
            }
            CodeRegistration::NoMatch => {
                tracing::debug!(student_number = %number, "No roster identity for student number");
                summary.missing += 1;
            }
        }
    }

    summary.duration = start.elapsed();
    crate::log_batch_complete!("codes", summary.total(), summary.duration);
    summary
}
