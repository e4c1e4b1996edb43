//! Domain models and types for Unitrack.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`StudentId`], [`AssessmentKey`])
//! - **Domain models** ([`Identity`], [`StudentResult`], [`Assessment`], [`Visit`])
//! - **Error types** ([`UnitrackError`], [`IngestError`], [`RosterError`])
//! - **Result type alias** ([`Result`])
//!
//! # Duplicate suppression
//!
//! Every collection that must stay free of duplicates is backed by an
//! explicit key rather than structural equality:
//!
//! | Entity | Key |
//! |---|---|
//! | [`Assessment`] | ([`AssessmentKey::module`], [`AssessmentKey::assessment`]) |
//! | [`ResultEntry`] | (display name, candidate identity) |
//! | [`StudentResult`] | (assessment label, mark text, grade) |
//! | [`Visit`] | (module, email, elapsed time) |
//!
//! ```rust
//! use unitrack::domain::{Assessment, AssessmentKey, CandidateName, ResultEntry};
//!
//! let mut assessment = Assessment::new(AssessmentKey::new("CS101", "A1"));
//! let entry = ResultEntry::new("X17", CandidateName::Unresolved, "64", "");
//!
//! assert!(assessment.add_entry(entry.clone()));
//! assert!(!assessment.add_entry(entry));
//! assert_eq!(assessment.len(), 1);
//! ```

pub mod assessment;
pub mod errors;
pub mod ids;
pub mod result;
pub mod student;
pub mod visit;

// Re-export commonly used types for convenience
pub use assessment::{
    Assessment, AssessmentBook, CandidateName, ResultEntry, ResultRow, COLUMN_NAMES,
};
pub use errors::{IngestError, RosterError, UnitrackError};
pub use ids::{AssessmentKey, StudentId};
pub use result::Result;
pub use student::{Identity, StudentResult};
pub use visit::Visit;
