//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CourierConfig;
use crate::domain::errors::CourierError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CourierConfig
/// 4. Applies environment variable overrides (COURIER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use courier::config::loader::load_config;
///
/// let config = load_config("courier.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CourierConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CourierError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CourierError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CourierConfig = toml::from_str(&contents)
        .map_err(|e| CourierError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from `path`, or defaults when the file does not exist
///
/// Environment overrides and validation apply in both cases.
///
/// # Errors
///
/// Returns an error if an existing file is invalid or an override is malformed.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<CourierConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = CourierConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut CourierConfig) -> Result<()> {
    apply_env_overrides(config)?;
    config.validate().map_err(|e| {
        CourierError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CourierError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CourierError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using COURIER_* prefix
///
/// Environment variables follow the pattern: COURIER_<SECTION>_<KEY>
/// For example: COURIER_MAPPING_STATUS, COURIER_PARSER_DUPLICATE_SEGMENTS
fn apply_env_overrides(config: &mut CourierConfig) -> Result<()> {
    if let Ok(val) = std::env::var("COURIER_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("COURIER_PARSER_DUPLICATE_SEGMENTS") {
        config.parser.duplicate_segments = val.parse()?;
    }

    if let Ok(val) = std::env::var("COURIER_MAPPING_CODE_SYSTEM") {
        config.mapping.code_system = val;
    }
    if let Ok(val) = std::env::var("COURIER_MAPPING_UNIT_SYSTEM") {
        config.mapping.unit_system = val;
    }
    if let Ok(val) = std::env::var("COURIER_MAPPING_STATUS") {
        config.mapping.status =
            serde_json::from_value(serde_json::Value::String(val.to_lowercase())).map_err(
                |_| CourierError::Configuration(format!("Invalid resource status: {val}")),
            )?;
    }
    if let Ok(val) = std::env::var("COURIER_MAPPING_OBSERVATION_FAILURES") {
        config.mapping.observation_failures = val.parse()?;
    }

    if let Ok(val) = std::env::var("COURIER_OUTPUT_PRETTY") {
        config.output.pretty = val.parse().unwrap_or(true);
    }

    if let Ok(val) = std::env::var("COURIER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("COURIER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("COURIER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
