//! Import command implementation
//!
//! Loads the roster, then applies every anonymous-code file, result file
//! and participation page given on the command line, in that order.

use super::read_input;
use crate::adapters::delimited::parse_rows;
use crate::adapters::roster::{CsvRosterProvider, RosterProvider};
use crate::cli::{EXIT_ABORTED, EXIT_CONFIG, EXIT_OK, EXIT_STRUCTURAL};
use crate::config::{load_config, UnitrackConfig};
use crate::core::roster::RosterStore;
use crate::core::session::Session;
use clap::Args;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// A participation page and the module it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipationSource {
    /// Module tag; `None` falls back to `participation.default_module`
    pub module: Option<String>,
    pub file: PathBuf,
}

/// Parses `MODULE=FILE` or a bare `FILE`
///
/// Text before the first `=` is a module only when it is a module code
/// (letters, digits, `-` and `_`); otherwise the whole value is a path.
pub fn parse_participation_source(value: &str) -> Result<ParticipationSource, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("participation file cannot be empty".to_string());
    }

    match value.split_once('=') {
        Some((module, file)) if is_module_code(module.trim()) => {
            if file.trim().is_empty() {
                return Err(format!("expected MODULE=FILE, got '{value}'"));
            }
            Ok(ParticipationSource {
                module: Some(module.trim().to_string()),
                file: PathBuf::from(file.trim()),
            })
        }
        Some((module, _)) if module.trim().is_empty() => {
            Err(format!("expected MODULE=FILE, got '{value}'"))
        }
        _ => Ok(ParticipationSource {
            module: None,
            file: PathBuf::from(value),
        }),
    }
}

fn is_module_code(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Arguments for the import command
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Roster file, overriding `roster.source`
    #[arg(long, value_name = "FILE")]
    pub roster: Option<PathBuf>,

    /// Anonymous-code mapping file (student number, code); repeatable
    #[arg(long, value_name = "FILE")]
    pub codes: Vec<PathBuf>,

    /// Exam result export; repeatable
    #[arg(long, value_name = "FILE")]
    pub results: Vec<PathBuf>,

    /// Participation page as MODULE=FILE; repeatable
    #[arg(long, value_name = "MODULE=FILE", value_parser = parse_participation_source)]
    pub participation: Vec<ParticipationSource>,

    /// Continue without a roster if the roster source is unavailable
    #[arg(short, long)]
    pub yes: bool,

    /// Print the session snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

impl ImportArgs {
    /// Execute the import command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting import command");

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Configuration could not be loaded");
                eprintln!("{e}");
                return Ok(EXIT_CONFIG);
            }
        };

        // Resolve every participation module before touching any input
        let mut pages = Vec::with_capacity(self.participation.len());
        for source in &self.participation {
            let module = source
                .module
                .clone()
                .unwrap_or_else(|| config.participation.default_module.clone());
            if module.trim().is_empty() {
                eprintln!(
                    "No module given for {} and participation.default_module is empty",
                    source.file.display()
                );
                return Ok(EXIT_CONFIG);
            }
            pages.push((module, source.file.clone()));
        }

        let roster = match self.load_roster(&config).await? {
            RosterOutcome::Loaded(roster) => roster,
            RosterOutcome::Exit(code) => return Ok(code),
        };

        let mut session = Session::new(roster).with_unresolved_name(&config.import.unresolved_name);
        let delimiter = config.import.delimiter_char();

        for path in &self.codes {
            let (text, _) = read_input(path).await?;
            let summary = session.register_codes(&parse_rows(&text, delimiter));
            summary.log_summary();
            println!("{}: {}", path.display(), summary.message());
            if summary.duplicates > 0 {
                println!(
                    "  {} codes were already registered to another student",
                    summary.duplicates
                );
            }
        }

        for path in &self.results {
            let (text, digest) = read_input(path).await?;
            let summary = match session.ingest_results(&parse_rows(&text, delimiter)) {
                Ok(summary) => summary.with_fingerprint(digest),
                Err(e) if e.is_structural() => {
                    crate::log_error_with_context!(&e, "Result file rejected");
                    eprintln!("{}: {e}", path.display());
                    return Ok(EXIT_STRUCTURAL);
                }
                Err(e) => return Err(e.into()),
            };
            summary.log_summary();
            println!("{}: {}", path.display(), summary.message());
        }

        for (module, path) in &pages {
            let (html, _) = read_input(path).await?;
            let summary = session.apply_participation(module, &html)?;
            summary.log_summary();
            println!(
                "{}: {} visits recorded for {}, {} did not match any student",
                path.display(),
                summary.applied,
                module,
                summary.unmatched
            );
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        } else {
            print_overview(&session);
        }

        Ok(EXIT_OK)
    }

    async fn load_roster(&self, config: &UnitrackConfig) -> anyhow::Result<RosterOutcome> {
        let provider = match &self.roster {
            Some(path) => {
                CsvRosterProvider::new(path, config.roster.delimiter_char(), config.roster.has_header)
            }
            None => CsvRosterProvider::from_config(&config.roster),
        };

        match provider.fetch().await {
            Ok(identities) => Ok(RosterOutcome::Loaded(RosterStore::from_identities(
                identities,
            ))),
            Err(e) if e.is_roster_unavailable() => {
                tracing::warn!(source = %provider.describe(), error = %e, "Roster unavailable");
                eprintln!("Could not load {}: {e}", provider.describe());

                if self.yes || confirm("Continue without roster? [y/N]: ").await? {
                    tracing::info!("Continuing with an empty roster");
                    Ok(RosterOutcome::Loaded(RosterStore::new()))
                } else {
                    println!("Import cancelled.");
                    Ok(RosterOutcome::Exit(EXIT_ABORTED))
                }
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Roster rejected");
                eprintln!("{e}");
                Ok(RosterOutcome::Exit(EXIT_STRUCTURAL))
            }
        }
    }
}

enum RosterOutcome {
    Loaded(RosterStore),
    Exit(i32),
}

async fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(prompt.as_bytes()).await?;
    stdout.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(is_affirmative(&answer))
}

/// Returns true for a "yes" answer to a prompt
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_overview(session: &Session) {
    println!();
    println!("Students: {}", session.identities().len());
    for assessment in session.assessments().iter() {
        let resolved = assessment
            .entries()
            .iter()
            .filter(|entry| entry.name.is_resolved())
            .count();
        println!(
            "  {}: {} results ({} resolved)",
            assessment,
            assessment.len(),
            resolved
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_participation_with_module() {
        assert_eq!(
            parse_participation_source("CS101=pages/cs101.html").unwrap(),
            ParticipationSource {
                module: Some("CS101".to_string()),
                file: PathBuf::from("pages/cs101.html"),
            }
        );
    }

    #[test]
    fn test_parse_participation_bare_file() {
        let source = parse_participation_source("cs101.html").unwrap();
        assert_eq!(source.module, None);
    }

    #[test_case("pages/run=2/cs101.html" ; "path with equals")]
    #[test_case("./week=3.html" ; "relative file with equals")]
    fn test_parse_participation_path_containing_equals(value: &str) {
        let source = parse_participation_source(value).unwrap();
        assert_eq!(source.module, None);
        assert_eq!(source.file, PathBuf::from(value));
    }

    #[test]
    fn test_parse_participation_module_then_path_with_equals() {
        let source = parse_participation_source("CS-101=pages/run=2.html").unwrap();
        assert_eq!(source.module.as_deref(), Some("CS-101"));
        assert_eq!(source.file, PathBuf::from("pages/run=2.html"));
    }

    #[test_case("=cs101.html" ; "missing module")]
    #[test_case("CS101=" ; "missing file")]
    #[test_case("" ; "empty")]
    fn test_parse_participation_invalid(value: &str) {
        assert!(parse_participation_source(value).is_err());
    }

    #[test_case("y", true)]
    #[test_case("YES\n", true)]
    #[test_case("n", false)]
    #[test_case("", false)]
    fn test_is_affirmative(answer: &str, expected: bool) {
        assert_eq!(is_affirmative(answer), expected);
    }
}
