//! Result ingestion
//!
//! - [`header`] - Header normalization and column resolution
//! - [`ingestor`] - Row-by-row de-anonymization into the roster
//! - [`summary`] - Batch counters and reporting

pub mod header;
pub mod ingestor;
pub mod summary;

pub use header::ColumnMap;
pub use ingestor::{BatchOutcome, ResultIngestor};
pub use summary::IngestSummary;
