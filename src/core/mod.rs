//! Core reconciliation pipeline for Unitrack.
//!
//! # Modules
//!
//! - [`roster`] - Roster repository and its in-memory store
//! - [`ingest`] - Exam-result ingestion and de-anonymization
//! - [`participation`] - Participation page extraction and visit application
//! - [`codes`] - Anonymous marking code import
//! - [`session`] - Session state and the consumer query surface
//!
//! # Workflow
//!
//! 1. **Load roster**: identities arrive from a roster provider
//! 2. **Register codes**: anonymous codes are attached by student number
//! 3. **Ingest results**: candidate codes resolve to identities; assessments
//!    are built and merged into the session
//! 4. **Apply participation**: scraped visits are recorded by email
//! 5. **Query**: consumers read identities, assessments and comparisons
//!
//! # Example
//!
//! ```rust
//! use unitrack::core::roster::RosterStore;
//! use unitrack::core::session::Session;
//! use unitrack::domain::{Identity, StudentId};
//!
//! let roster = RosterStore::from_identities(vec![Identity::new(
//!     StudentId::new("1001").unwrap(),
//!     "Ada Lovelace",
//!     "ada@uni.ac.uk",
//!     "Dr Babbage",
//! )]);
//! let mut session = Session::new(roster);
//!
//! session.register_codes(&[vec!["1001", "K-77"]]);
//! let summary = session
//!     .ingest_results(&[
//!         vec!["\"#Module\"", "\"#Ass\"", "\"#Cand Key\"", "\"Mark\"", "\"Grade\""],
//!         vec!["CS101", "Exam", "K-77/1", "68", "B"],
//!     ])
//!     .unwrap();
//! assert_eq!(summary.resolved, 1);
//!
//! let html = r#"<td class="cell c3">ada@uni.ac.uk</td><td class="cell c6">now</td>"#;
//! session.apply_participation("CS101", html).unwrap();
//!
//! let ada = &session.identities()[0];
//! assert_eq!(ada.results()[0].to_string(), "CS101 Exam (mark 68)");
//! assert_eq!(ada.visits()[0].to_string(), "CS101 last visited: now");
//! ```

pub mod codes;
pub mod ingest;
pub mod participation;
pub mod roster;
pub mod session;
