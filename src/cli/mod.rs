//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Unitrack using clap.
//!
//! Exit codes shared by all commands:
//!
//! | Code | Meaning |
//! |---|---|
//! | 0 | Success |
//! | 2 | Configuration error |
//! | 3 | Structural input error (missing column, invalid roster record) |
//! | 4 | Aborted by the operator after a roster failure |
//! | 5 | Fatal error |

pub mod commands;

use clap::{Parser, Subcommand};

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for structural input errors
pub const EXIT_STRUCTURAL: i32 = 3;
/// Exit code when the operator declines to continue without a roster
pub const EXIT_ABORTED: i32 = 4;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Unitrack - student roster reconciliation
#[derive(Parser, Debug)]
#[command(name = "unitrack")]
#[command(version, about, long_about = None)]
#[command(author = "Unitrack Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "unitrack.toml", env = "UNITRACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "UNITRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the roster and reconcile codes, results and participation pages
    Import(commands::import::ImportArgs),

    /// Extract visits from a participation page without a roster
    Extract(commands::extract::ExtractArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
