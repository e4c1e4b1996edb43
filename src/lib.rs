// Unitrack - Student Roster Reconciliation Tool
// Copyright (c) 2025 Unitrack Contributors
// Licensed under the MIT License

//! # Unitrack - Student Roster Reconciliation
//!
//! Unitrack reconciles anonymised exam-result exports and scraped course
//! participation pages against a roster of students.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **De-anonymizing** exam results by resolving candidate codes to students
//! - **Aggregating** results per (module, assessment) with duplicate suppression
//! - **Extracting** last-visit records from participation pages whose rows
//!   carry a varying number of fields
//! - **Querying** the reconciled roster for display, export and charting
//!
//! ## Architecture
//!
//! Unitrack follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pipeline (roster, ingest, participation, codes, session)
//! - [`adapters`] - Delimited text input and roster providers
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use unitrack::adapters::delimited::parse_rows;
//! use unitrack::adapters::{CsvRosterProvider, RosterProvider};
//! use unitrack::config::load_config;
//! use unitrack::core::roster::RosterStore;
//! use unitrack::core::session::Session;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("unitrack.toml")?;
//!
//!     let identities = CsvRosterProvider::from_config(&config.roster).fetch().await?;
//!     let mut session = Session::new(RosterStore::from_identities(identities))
//!         .with_unresolved_name(&config.import.unresolved_name);
//!
//!     let codes = std::fs::read_to_string("codes.csv")?;
//!     session.register_codes(&parse_rows(&codes, ',')).log_summary();
//!
//!     let results = std::fs::read_to_string("results.csv")?;
//!     let summary = session.ingest_results(&parse_rows(&results, ','))?;
//!     println!("{}", summary.message());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only structural failures are errors ([`domain::UnitrackError`]). Short
//! rows, unresolved codes and non-numeric marks are counted and logged:
//!
//! ```rust
//! use unitrack::core::session::Session;
//! use unitrack::domain::{IngestError, UnitrackError};
//!
//! let mut session = Session::default();
//! let err = session
//!     .ingest_results(&[vec!["module", "ass", "candkey", "grade"]])
//!     .unwrap_err();
//!
//! assert!(matches!(
//!     err,
//!     UnitrackError::Ingest(IngestError::MissingColumn { column: "mark" })
//! ));
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
