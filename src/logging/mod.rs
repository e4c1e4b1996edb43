//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output filtered by level or `RUST_LOG`
//! - JSON-formatted rolling log files
//!
//! # Example
//!
//! ```no_run
//! use unitrack::logging::init_logging;
//! use unitrack::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(module = "CS101", "Participation page loaded");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a batch
///
/// # Example
///
/// ```no_run
/// use unitrack::log_batch_complete;
/// use std::time::Duration;
///
/// log_batch_complete!("results", 120, Duration::from_millis(35));
/// ```
#[macro_export]
macro_rules! log_batch_complete {
    ($kind:expr, $rows:expr, $duration:expr) => {
        tracing::info!(
            kind = $kind,
            rows = $rows,
            duration_ms = $duration.as_millis() as u64,
            "Batch completed"
        );
    };
}

/// Log a row that was skipped without aborting its batch
///
/// # Example
///
/// ```no_run
/// use unitrack::log_row_skipped;
///
/// log_row_skipped!(14, "row is shorter than the header");
/// ```
#[macro_export]
macro_rules! log_row_skipped {
    ($row:expr, $reason:expr) => {
        tracing::warn!(row = $row, reason = $reason, "Row skipped");
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use unitrack::log_error_with_context;
/// use unitrack::domain::UnitrackError;
///
/// let error = UnitrackError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
