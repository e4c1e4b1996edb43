//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::UnitrackConfig;
use crate::domain::errors::UnitrackError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Prefix of environment variables that override file settings
pub const ENV_PREFIX: &str = "UNITRACK_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into UnitrackConfig
/// 4. Applies environment variable overrides (UNITRACK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`UnitrackError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use unitrack::config::loader::load_config;
///
/// let config = load_config("unitrack.toml").expect("Failed to load config");
/// println!("Roster: {}", config.roster.source);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<UnitrackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(UnitrackError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        UnitrackError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text, as [`load_config`] does for a file
pub fn load_config_str(contents: &str) -> Result<UnitrackConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: UnitrackConfig = toml::from_str(&contents)
        .map_err(|e| UnitrackError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        UnitrackError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| UnitrackError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|m| m == name) {
                        missing_vars.push(name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(UnitrackError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the UNITRACK_* prefix
///
/// Variables follow the pattern `UNITRACK_<SECTION>_<KEY>`, for example
/// `UNITRACK_ROSTER_SOURCE`. Unparsable booleans leave the file value.
fn apply_env_overrides(config: &mut UnitrackConfig) {
    let var = |key: &str| std::env::var(format!("{ENV_PREFIX}{key}")).ok();

    if let Some(val) = var("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Some(val) = var("ROSTER_SOURCE") {
        config.roster.source = val;
    }
    if let Some(val) = var("ROSTER_DELIMITER") {
        config.roster.delimiter = val;
    }

    if let Some(val) = var("IMPORT_DELIMITER") {
        config.import.delimiter = val;
    }
    if let Some(val) = var("IMPORT_UNRESOLVED_NAME") {
        config.import.unresolved_name = val;
    }

    if let Some(val) = var("PARTICIPATION_DEFAULT_MODULE") {
        config.participation.default_module = val;
    }

    if let Some(val) = var("LOGGING_LOCAL_ENABLED") {
        if let Ok(enabled) = val.parse() {
            config.logging.local_enabled = enabled;
        }
    }
    if let Some(val) = var("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests in this module mutate process-wide environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_substitute_env_vars() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("UNITRACK_TEST_SOURCE", "/srv/roster.csv");
        let result = substitute_env_vars("source = \"${UNITRACK_TEST_SOURCE}\"").unwrap();
        assert_eq!(result, "source = \"/srv/roster.csv\"\n");
        std::env::remove_var("UNITRACK_TEST_SOURCE");
    }

    #[test]
    fn test_substitute_env_vars_missing_names_all() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("UNITRACK_MISSING_A");
        std::env::remove_var("UNITRACK_MISSING_B");
        let err = substitute_env_vars("a = \"${UNITRACK_MISSING_A}\"\nb = \"${UNITRACK_MISSING_B}\"")
            .unwrap_err()
            .to_string();
        assert!(err.contains("UNITRACK_MISSING_A"));
        assert!(err.contains("UNITRACK_MISSING_B"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::remove_var("UNITRACK_NOT_SET");
        let input = "# source = \"${UNITRACK_NOT_SET}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), format!("{input}\n"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("nonexistent-unitrack.toml").unwrap_err();
        assert!(matches!(err, UnitrackError::Configuration(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let toml_content = r#"
[application]
log_level = "debug"

[roster]
source = "students.tsv"
delimiter = "\t"

[import]
unresolved_name = "Unknown"

[participation]
default_module = "CS101"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.roster.source, "students.tsv");
        assert_eq!(config.roster.delimiter_char(), '\t');
        assert_eq!(config.import.unresolved_name, "Unknown");
        assert_eq!(config.import.delimiter, ",");
        assert_eq!(config.participation.default_module, "CS101");
    }

    #[test]
    fn test_env_override_applied_then_validated() {
        let _guard = ENV_MUTEX.lock().unwrap();
        std::env::set_var("UNITRACK_IMPORT_DELIMITER", "::");
        let result = load_config_str("");
        std::env::remove_var("UNITRACK_IMPORT_DELIMITER");

        let err = result.unwrap_err().to_string();
        assert!(err.contains("import.delimiter"));
    }
}
