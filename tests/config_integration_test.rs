//! Integration tests for configuration loading and validation

use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use unitrack::config::load_config;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("UNITRACK_APPLICATION_LOG_LEVEL");
    std::env::remove_var("UNITRACK_ROSTER_SOURCE");
    std::env::remove_var("UNITRACK_IMPORT_DELIMITER");
    std::env::remove_var("UNITRACK_IMPORT_UNRESOLVED_NAME");
    std::env::remove_var("UNITRACK_PARTICIPATION_DEFAULT_MODULE");
    std::env::remove_var("UNITRACK_LOGGING_LOCAL_ENABLED");
    std::env::remove_var("UNITRACK_LOGGING_LOCAL_PATH");
    std::env::remove_var("TEST_ROSTER_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "warn"

[roster]
source = "/srv/unitrack/roster.tsv"
delimiter = "\t"
has_header = false

[import]
delimiter = ";"
unresolved_name = "Unknown candidate"

[participation]
default_module = "CS204"

[logging]
local_enabled = true
local_path = "/tmp/unitrack-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.roster.source, "/srv/unitrack/roster.tsv");
    assert_eq!(config.roster.delimiter_char(), '\t');
    assert!(!config.roster.has_header);
    assert_eq!(config.import.delimiter_char(), ';');
    assert_eq!(config.import.unresolved_name, "Unknown candidate");
    assert_eq!(config.participation.default_module, "CS204");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_missing_sections_use_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[roster]\nsource = \"students.csv\"\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.import.unresolved_name, "N/A");
    assert_eq!(config.import.delimiter, ",");
    assert!(config.roster.has_header);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_ROSTER_DIR", "/data/term1");

    let file = write_config(
        r#"
# Roster lives under ${TEST_ROSTER_DIR}
[roster]
source = "${TEST_ROSTER_DIR}/roster.csv"
"#,
    );
    let result = load_config(file.path());
    cleanup_env_vars();

    assert_eq!(result.unwrap().roster.source, "/data/term1/roster.csv");
}

#[test]
fn test_missing_env_var_is_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[roster]\nsource = \"${TEST_ROSTER_DIR}/roster.csv\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_ROSTER_DIR"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("UNITRACK_APPLICATION_LOG_LEVEL", "debug");
    std::env::set_var("UNITRACK_ROSTER_SOURCE", "override.csv");
    std::env::set_var("UNITRACK_IMPORT_UNRESOLVED_NAME", "???");
    std::env::set_var("UNITRACK_PARTICIPATION_DEFAULT_MODULE", "MA101");
    std::env::set_var("UNITRACK_LOGGING_LOCAL_ENABLED", "true");
    std::env::set_var("UNITRACK_LOGGING_LOCAL_PATH", "/var/log/unitrack");

    let file = write_config("[application]\nlog_level = \"info\"\n");
    let result = load_config(file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.roster.source, "override.csv");
    assert_eq!(config.import.unresolved_name, "???");
    assert_eq!(config.participation.default_module, "MA101");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/var/log/unitrack");
}

#[test]
fn test_invalid_values_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"loud\"\n",
        "[import]\ndelimiter = \"||\"\n",
        "[import]\nunresolved_name = \"\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[roster]\nsource = \"\"\n",
    ] {
        let file = write_config(contents);
        assert!(load_config(file.path()).is_err(), "accepted: {contents}");
    }
}

#[test]
fn test_malformed_toml_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[roster\nsource = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}
