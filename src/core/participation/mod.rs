//! Participation log extraction
//!
//! - [`cells`] - Finds the tagged cells of a scraped page and strips markup
//! - [`classifier`] - Content-driven state machine grouping cells into rows
//! - [`extractor`] - Page to visit records for one module
//! - [`applier`] - Records visits on the roster by email

pub mod applier;
pub mod cells;
pub mod classifier;
pub mod extractor;

pub use applier::{ApplySummary, VisitApplier};
pub use extractor::{ParticipationExtractor, Visits};
