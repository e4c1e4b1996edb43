//! Header resolution for result exports
//!
//! Export headers arrive decorated with quotes, hashes and stray spaces
//! (`"#Cand Key"`). Each header cell is normalized and mapped onto one of
//! the five logical columns the ingestor needs.

use crate::domain::IngestError;
use std::collections::HashMap;

/// Logical columns required in every result export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalColumn {
    Module,
    Assessment,
    CandidateKey,
    Mark,
    Grade,
}

impl LogicalColumn {
    /// All required columns, in the order they are checked
    pub const REQUIRED: [LogicalColumn; 5] = [
        LogicalColumn::Module,
        LogicalColumn::Assessment,
        LogicalColumn::CandidateKey,
        LogicalColumn::Mark,
        LogicalColumn::Grade,
    ];

    /// Normalized header text identifying this column
    pub fn header_name(self) -> &'static str {
        match self {
            LogicalColumn::Module => "module",
            LogicalColumn::Assessment => "ass",
            LogicalColumn::CandidateKey => "candkey",
            LogicalColumn::Mark => "mark",
            LogicalColumn::Grade => "grade",
        }
    }
}

/// Normalizes a header cell: drops quotes, hashes and whitespace, lowercases
///
/// # Examples
///
/// ```
/// use unitrack::core::ingest::header::normalize_header;
///
/// assert_eq!(normalize_header("\"#Cand Key\""), "candkey");
/// assert_eq!(normalize_header(" MARK "), "mark");
/// ```
pub fn normalize_header(cell: &str) -> String {
    cell.chars()
        .filter(|c| *c != '"' && *c != '#' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strips quote and hash noise from a data cell
pub fn strip_noise(cell: &str) -> String {
    cell.chars()
        .filter(|c| *c != '"' && *c != '#')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Raw candidate code: the cleaned cell up to the first `/`
///
/// # Examples
///
/// ```
/// use unitrack::core::ingest::header::candidate_code;
///
/// assert_eq!(candidate_code("\"#AB123/2\""), "AB123");
/// assert_eq!(candidate_code("AB123"), "AB123");
/// ```
pub fn candidate_code(cell: &str) -> String {
    let cleaned = strip_noise(cell);
    match cleaned.split_once('/') {
        Some((prefix, _)) => prefix.trim().to_string(),
        None => cleaned,
    }
}

/// One data row reduced to the five logical cells, already cleaned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResultRow {
    pub module: String,
    pub assessment: String,
    pub code: String,
    pub mark: String,
    pub grade: String,
}

/// Positions of the logical columns within a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    module: usize,
    assessment: usize,
    candidate_key: usize,
    mark: usize,
    grade: usize,
}

impl ColumnMap {
    /// Resolves the logical columns of `header`
    ///
    /// When a normalized name appears more than once the last occurrence
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingColumn`] naming the first required
    /// column that is absent.
    pub fn resolve<S: AsRef<str>>(header: &[S]) -> Result<Self, IngestError> {
        let positions: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| (normalize_header(cell.as_ref()), i))
            .collect();

        let find = |column: LogicalColumn| {
            positions
                .get(column.header_name())
                .copied()
                .ok_or(IngestError::MissingColumn {
                    column: column.header_name(),
                })
        };

        Ok(Self {
            module: find(LogicalColumn::Module)?,
            assessment: find(LogicalColumn::Assessment)?,
            candidate_key: find(LogicalColumn::CandidateKey)?,
            mark: find(LogicalColumn::Mark)?,
            grade: find(LogicalColumn::Grade)?,
        })
    }

    /// Position of a logical column
    pub fn position(&self, column: LogicalColumn) -> usize {
        match column {
            LogicalColumn::Module => self.module,
            LogicalColumn::Assessment => self.assessment,
            LogicalColumn::CandidateKey => self.candidate_key,
            LogicalColumn::Mark => self.mark,
            LogicalColumn::Grade => self.grade,
        }
    }

    /// Minimum number of cells a data row needs
    pub fn width(&self) -> usize {
        LogicalColumn::REQUIRED
            .iter()
            .map(|c| self.position(*c))
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Extracts and cleans the logical cells of `row`
    ///
    /// Returns `None` when the row is too short to hold every column.
    pub fn extract<S: AsRef<str>>(&self, row: &[S]) -> Option<RawResultRow> {
        if row.len() < self.width() {
            return None;
        }
        let cell = |column: LogicalColumn| row[self.position(column)].as_ref();

        Some(RawResultRow {
            module: strip_noise(cell(LogicalColumn::Module)),
            assessment: strip_noise(cell(LogicalColumn::Assessment)),
            code: candidate_code(cell(LogicalColumn::CandidateKey)),
            mark: strip_noise(cell(LogicalColumn::Mark)),
            grade: strip_noise(cell(LogicalColumn::Grade)),
        })
    }
}
