//! Domain error types
//!
//! This module defines the error hierarchy for Unitrack. Only failures that
//! abort an operation live here: row-level skips, unresolved candidate codes
//! and unparsable marks are reported through counters instead.

use thiserror::Error;

/// Main Unitrack error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum UnitrackError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Structural ingestion errors (the whole batch was rejected)
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Roster source errors
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Structural errors raised while ingesting a result table
///
/// Any of these aborts the batch before a single row is applied, so the
/// roster and the assessment book are left untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// The input did not contain a header row
    #[error("Result table is empty: a header row is required")]
    EmptyInput,

    /// A required logical column is absent from the header row
    #[error("Required column '{column}' is missing from the header")]
    MissingColumn { column: &'static str },
}

/// Errors raised by roster providers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The roster source could not be reached or read
    #[error("Roster source unavailable: {0}")]
    Unavailable(String),

    /// A roster record could not be turned into an identity
    #[error("Invalid roster record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

impl UnitrackError {
    /// Returns true when the error is a structural ingest failure
    pub fn is_structural(&self) -> bool {
        matches!(self, UnitrackError::Ingest(_))
    }

    /// Returns true when the roster source could not be reached
    pub fn is_roster_unavailable(&self) -> bool {
        matches!(self, UnitrackError::Roster(RosterError::Unavailable(_)))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for UnitrackError {
    fn from(err: std::io::Error) -> Self {
        UnitrackError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for UnitrackError {
    fn from(err: serde_json::Error) -> Self {
        UnitrackError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for UnitrackError {
    fn from(err: toml::de::Error) -> Self {
        UnitrackError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unitrack_error_display() {
        let err = UnitrackError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_missing_column_display() {
        let err: UnitrackError = IngestError::MissingColumn { column: "mark" }.into();
        assert_eq!(
            err.to_string(),
            "Ingest error: Required column 'mark' is missing from the header"
        );
        assert!(err.is_structural());
    }

    #[test]
    fn test_roster_error_conversion() {
        let err: UnitrackError = RosterError::Unavailable("connection refused".to_string()).into();
        assert!(err.is_roster_unavailable());
        assert!(!err.is_structural());
    }

    #[test]
    fn test_invalid_record_is_not_unavailable() {
        let err: UnitrackError = RosterError::InvalidRecord {
            line: 3,
            reason: "empty id".to_string(),
        }
        .into();
        assert!(!err.is_roster_unavailable());
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: UnitrackError = io_err.into();
        assert!(matches!(err, UnitrackError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: UnitrackError = toml_err.into();
        assert!(matches!(err, UnitrackError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_unitrack_error_implements_std_error() {
        let err = UnitrackError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
