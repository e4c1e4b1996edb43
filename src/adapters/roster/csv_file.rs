//! Roster provider backed by a delimiter-separated file
//!
//! Columns, in order: student id, email, display name, tutor. The tutor
//! column is optional.

use super::RosterProvider;
use crate::adapters::delimited::parse_rows;
use crate::config::RosterConfig;
use crate::domain::ids::StudentId;
use crate::domain::student::Identity;
use crate::domain::{Result, RosterError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

const ID: usize = 0;
const EMAIL: usize = 1;
const NAME: usize = 2;
const TUTOR: usize = 3;

/// Reads identities from a CSV/TSV export of the roster
#[derive(Debug, Clone)]
pub struct CsvRosterProvider {
    path: PathBuf,
    delimiter: char,
    has_header: bool,
}

impl CsvRosterProvider {
    /// Creates a provider for `path`
    pub fn new(path: impl AsRef<Path>, delimiter: char, has_header: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter,
            has_header,
        }
    }

    /// Creates a provider from the `[roster]` configuration section
    pub fn from_config(config: &RosterConfig) -> Self {
        Self::new(&config.source, config.delimiter_char(), config.has_header)
    }

    /// Parses roster text into identities
    ///
    /// Line numbers in errors are 1-based and count the header row.
    pub fn parse(&self, text: &str) -> Result<Vec<Identity>> {
        let skip = usize::from(self.has_header);
        parse_rows(text, self.delimiter)
            .into_iter()
            .enumerate()
            .skip(skip)
            .map(|(index, row)| parse_record(index + 1, &row))
            .collect()
    }
}

fn parse_record(line: usize, row: &[String]) -> Result<Identity> {
    if row.len() <= NAME {
        return Err(RosterError::InvalidRecord {
            line,
            reason: format!("expected at least 3 columns, found {}", row.len()),
        }
        .into());
    }

    let id = StudentId::new(row[ID].trim())
        .map_err(|reason| RosterError::InvalidRecord { line, reason })?;
    let tutor = row.get(TUTOR).map(|t| t.trim()).unwrap_or_default();

    Ok(Identity::new(
        id,
        row[NAME].trim(),
        row[EMAIL].trim(),
        tutor,
    ))
}

#[async_trait]
impl RosterProvider for CsvRosterProvider {
    async fn fetch(&self) -> Result<Vec<Identity>> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RosterError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let identities = self.parse(&text)?;
        tracing::info!(
            source = %self.path.display(),
            identities = identities.len(),
            "Roster loaded"
        );
        Ok(identities)
    }

    fn describe(&self) -> String {
        format!("roster file {}", self.path.display())
    }
}
