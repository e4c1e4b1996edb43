//! Configuration schema types
//!
//! Every section and field has a default, so a missing file section falls
//! back to the values shown by `unitrack init`.

use serde::{Deserialize, Serialize};

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_ROTATIONS: [&str; 3] = ["daily", "hourly", "never"];

/// Main Unitrack configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitrackConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Roster source settings
    #[serde(default)]
    pub roster: RosterConfig,

    /// Result and code file settings
    #[serde(default)]
    pub import: ImportConfig,

    /// Participation extraction settings
    #[serde(default)]
    pub participation: ParticipationConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl UnitrackConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.roster.validate()?;
        self.import.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Roster source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Path of the roster file
    #[serde(default = "default_roster_source")]
    pub source: String,

    /// Field delimiter of the roster file
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Whether the first row is a header
    #[serde(default = "default_true")]
    pub has_header: bool,
}

impl RosterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.source.trim().is_empty() {
            return Err("roster.source cannot be empty".to_string());
        }
        validate_delimiter("roster.delimiter", &self.delimiter)
    }

    /// Delimiter as a character
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            source: default_roster_source(),
            delimiter: default_delimiter(),
            has_header: true,
        }
    }
}

/// Result and anonymous-code file configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Field delimiter of result and code files
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Display name shown for result rows that did not resolve
    #[serde(default = "default_unresolved_name")]
    pub unresolved_name: String,
}

impl ImportConfig {
    fn validate(&self) -> Result<(), String> {
        validate_delimiter("import.delimiter", &self.delimiter)?;
        if self.unresolved_name.trim().is_empty() {
            return Err("import.unresolved_name cannot be empty".to_string());
        }
        Ok(())
    }

    /// Delimiter as a character
    pub fn delimiter_char(&self) -> char {
        self.delimiter.chars().next().unwrap_or(',')
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            unresolved_name: default_unresolved_name(),
        }
    }
}

/// Participation extraction configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticipationConfig {
    /// Module tag used when none is given on the command line
    #[serde(default)]
    pub default_module: String,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if !VALID_ROTATIONS.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                VALID_ROTATIONS.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_delimiter(field: &str, delimiter: &str) -> Result<(), String> {
    let mut chars = delimiter.chars();
    match (chars.next(), chars.next()) {
        (Some('"'), None) => Err(format!("{field} cannot be a double quote")),
        (Some(_), None) => Ok(()),
        _ => Err(format!(
            "{field} must be exactly one character, got '{delimiter}'"
        )),
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_roster_source() -> String {
    "roster.csv".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_unresolved_name() -> String {
    "N/A".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
