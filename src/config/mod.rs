//! Configuration management for Unitrack.
//!
//! # Overview
//!
//! Unitrack reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `UNITRACK_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use unitrack::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("unitrack.toml")?;
//!
//! println!("Roster: {}", config.roster.source);
//! println!("Unresolved rows shown as: {}", config.import.unresolved_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`RosterConfig`] - Roster file location and layout
//! - [`ImportConfig`] - Result/code file delimiter and the unresolved-name sentinel
//! - [`ParticipationConfig`] - Default module tag for scraped pages
//! - [`LoggingConfig`] - Rolling file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [roster]
//! source = "${UNITRACK_ROSTER_DIR}/roster.csv"
//! delimiter = ","
//! has_header = true
//!
//! [import]
//! delimiter = ","
//! unresolved_name = "N/A"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, ImportConfig, LoggingConfig, ParticipationConfig, RosterConfig,
    UnitrackConfig,
};
