//! Roster source adapters
//!
//! The roster arrives from an external source that the pipeline treats as
//! opaque. Providers only have to hand back identities in a stable order;
//! how they authenticate or transport the data is their own concern.

pub mod csv_file;

pub use csv_file::CsvRosterProvider;

use crate::domain::student::Identity;
use crate::domain::Result;
use async_trait::async_trait;

/// Source of the session's identities
///
/// A provider that cannot reach its source returns
/// [`RosterError::Unavailable`](crate::domain::RosterError::Unavailable).
/// Callers decide whether to continue without a roster; providers never
/// retry on their own.
#[async_trait]
pub trait RosterProvider: Send + Sync {
    /// Fetches every identity, in source order
    ///
    /// # Errors
    ///
    /// Returns an error if the source is unreachable or a record is malformed.
    async fn fetch(&self) -> Result<Vec<Identity>>;

    /// Human-readable description of the source, for logs and prompts
    fn describe(&self) -> String;
}
