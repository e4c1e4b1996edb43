//! Extract command implementation
//!
//! Runs the participation extractor over one saved page and prints the
//! visits it finds. No roster is loaded.

use super::read_input;
use crate::cli::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::core::participation::ParticipationExtractor;
use crate::domain::Visit;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Module tag for the page, overriding `participation.default_module`
    #[arg(short, long)]
    pub module: Option<String>,

    /// Saved participation page
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print visits as a JSON array
    #[arg(long)]
    pub json: bool,
}

impl ExtractArgs {
    /// Execute the extract command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(module) = self.resolve_module(config_path) else {
            eprintln!("No module given: pass --module or set participation.default_module");
            return Ok(EXIT_CONFIG);
        };
        tracing::info!(module = %module, file = %self.file.display(), "Extracting participation");

        let (html, digest) = read_input(&self.file).await?;
        let extractor = ParticipationExtractor::new(module.as_str())?;
        let visits: Vec<Visit> = extractor.extract(&html).collect();
        tracing::info!(visits = visits.len(), fingerprint = %digest, "Participation extracted");

        if self.json {
            println!("{}", serde_json::to_string_pretty(&visits)?);
        } else {
            for visit in &visits {
                println!("{}", format_visit(visit));
            }
        }

        Ok(EXIT_OK)
    }

    /// Module from the command line, else from the configuration file
    fn resolve_module(&self, config_path: &str) -> Option<String> {
        if let Some(module) = &self.module {
            return Some(module.clone()).filter(|m| !m.trim().is_empty());
        }
        if !Path::new(config_path).exists() {
            return None;
        }
        load_config(config_path)
            .ok()
            .map(|config| config.participation.default_module)
            .filter(|m| !m.trim().is_empty())
    }
}

/// One output line: email, visit text and location when known
pub fn format_visit(visit: &Visit) -> String {
    let location: Vec<&str> = [visit.town.as_str(), visit.country.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

    if location.is_empty() {
        format!("{}\t{}", visit.email, visit)
    } else {
        format!("{}\t{} ({})", visit.email, visit, location.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_visit_without_location() {
        let visit = Visit::new("CS101", "ada@uni.ac.uk", "now", "", "");
        assert_eq!(format_visit(&visit), "ada@uni.ac.uk\tCS101 last visited: now");
    }

    #[test]
    fn test_format_visit_with_location() {
        let visit = Visit::new("CS101", "ada@uni.ac.uk", "2 days", "", "UK");
        assert_eq!(
            format_visit(&visit),
            "ada@uni.ac.uk\tCS101 last visited: 2 days ago (UK)"
        );
    }

    #[test]
    fn test_module_flag_wins() {
        let args = ExtractArgs {
            module: Some("CS101".to_string()),
            file: PathBuf::from("page.html"),
            json: false,
        };
        assert_eq!(args.resolve_module("missing.toml"), Some("CS101".to_string()));
    }

    #[test]
    fn test_no_module_without_config() {
        let args = ExtractArgs {
            module: None,
            file: PathBuf::from("page.html"),
            json: false,
        };
        assert_eq!(args.resolve_module("/nonexistent/unitrack.toml"), None);
    }
}
