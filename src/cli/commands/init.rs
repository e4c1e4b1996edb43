//! Init command implementation
//!
//! Writes a commented starter configuration.

use crate::cli::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "unitrack.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        match fs::write(&self.output, starter_config()) {
            Ok(()) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [roster] source at your roster export");
                println!("  2. Validate configuration: unitrack validate-config");
                println!("  3. Run an import: unitrack import --codes codes.csv --results results.csv");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }
}

/// Starter configuration with every setting at its default
pub fn starter_config() -> &'static str {
    r#"# Unitrack Configuration File
#
# Values may reference environment variables as ${VAR_NAME}.
# Any setting can be overridden with UNITRACK_<SECTION>_<KEY>,
# for example UNITRACK_ROSTER_SOURCE.

[application]
# trace, debug, info, warn or error
log_level = "info"

[roster]
# Roster export: student id, email, name, tutor
source = "roster.csv"
delimiter = ","
has_header = true

[import]
# Delimiter of result and anonymous-code files
delimiter = ","
# Name shown for results whose candidate code matched no student
unresolved_name = "N/A"

[participation]
# Module tag used when a page is given without MODULE=
default_module = ""

[logging]
local_enabled = false
local_path = "./logs"
# daily, hourly or never
local_rotation = "daily"
"#
}
