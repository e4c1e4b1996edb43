//! External integrations
//!
//! - [`delimited`] - Delimiter-separated text input
//! - [`roster`] - Roster source providers

pub mod delimited;
pub mod roster;

pub use roster::{CsvRosterProvider, RosterProvider};
