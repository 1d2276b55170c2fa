//! Configuration schema types
//!
//! Every section has defaults, so an empty TOML file (or no file at all) yields
//! a valid configuration.

use crate::domain::errors::CourierError;
use crate::domain::resource::ResourceStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the assembler does when a singleton segment appears twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSegmentPolicy {
    /// Keep the last occurrence and log a warning
    #[default]
    LastWriteWins,
    /// Fail with a duplicate segment error
    Reject,
}

impl FromStr for DuplicateSegmentPolicy {
    type Err = CourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last_write_wins" | "last-write-wins" => Ok(Self::LastWriteWins),
            "reject" => Ok(Self::Reject),
            _ => Err(CourierError::Configuration(format!(
                "Invalid duplicate segment policy: {s}. Expected 'last_write_wins' or 'reject'"
            ))),
        }
    }
}

/// What the mapper does when a single observation cannot be mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObservationFailurePolicy {
    /// Fail the whole message
    #[default]
    Abort,
    /// Drop the observation and report it in the skipped list
    Skip,
}

impl FromStr for ObservationFailurePolicy {
    type Err = CourierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(CourierError::Configuration(format!(
                "Invalid observation failure policy: {s}. Expected 'abort' or 'skip'"
            ))),
        }
    }
}

/// Main Courier configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourierConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Message parsing settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Resource mapping settings
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Output rendering settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CourierConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.mapping.validate()?;
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
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
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

/// Message parsing configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Handling of repeated MSH/PID/ORC/OBR segments
    #[serde(default)]
    pub duplicate_segments: DuplicateSegmentPolicy,
}

/// Resource mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Code system of report and observation codes
    #[serde(default = "default_code_system")]
    pub code_system: String,

    /// Code system of observation units
    #[serde(default = "default_unit_system")]
    pub unit_system: String,

    /// Status assigned to every generated resource
    #[serde(default)]
    pub status: ResourceStatus,

    /// Handling of observations that fail to map
    #[serde(default)]
    pub observation_failures: ObservationFailurePolicy,
}

impl MappingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.code_system.trim().is_empty() {
            return Err("mapping.code_system cannot be empty".to_string());
        }
        if self.unit_system.trim().is_empty() {
            return Err("mapping.unit_system cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            code_system: default_code_system(),
            unit_system: default_unit_system(),
            status: ResourceStatus::default(),
            observation_failures: ObservationFailurePolicy::default(),
        }
    }
}

/// Output rendering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
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

fn default_log_level() -> String {
    "info".to_string()
}

fn default_code_system() -> String {
    "http://loinc.org".to_string()
}

fn default_unit_system() -> String {
    "http://unitsofmeasure.org".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CourierConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.mapping.code_system, "http://loinc.org");
        assert_eq!(config.mapping.unit_system, "http://unitsofmeasure.org");
        assert_eq!(config.mapping.status, ResourceStatus::Final);
        assert_eq!(
            config.parser.duplicate_segments,
            DuplicateSegmentPolicy::LastWriteWins
        );
        assert_eq!(
            config.mapping.observation_failures,
            ObservationFailurePolicy::Abort
        );
        assert!(config.output.pretty);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: CourierConfig = toml::from_str("").unwrap();
        assert_eq!(config, CourierConfig::default());
    }

    #[test]
    fn test_policies_from_toml() {
        let config: CourierConfig = toml::from_str(
            r#"
[parser]
duplicate_segments = "reject"

[mapping]
observation_failures = "skip"
status = "preliminary"
"#,
        )
        .unwrap();

        assert_eq!(config.parser.duplicate_segments, DuplicateSegmentPolicy::Reject);
        assert_eq!(
            config.mapping.observation_failures,
            ObservationFailurePolicy::Skip
        );
        assert_eq!(config.mapping.status, ResourceStatus::Preliminary);
    }

    #[test]
    fn test_unknown_policy_rejected_by_toml() {
        let result = toml::from_str::<CourierConfig>("[parser]\nduplicate_segments = \"first\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            DuplicateSegmentPolicy::from_str("Reject").unwrap(),
            DuplicateSegmentPolicy::Reject
        );
        assert_eq!(
            DuplicateSegmentPolicy::from_str("last-write-wins").unwrap(),
            DuplicateSegmentPolicy::LastWriteWins
        );
        assert!(DuplicateSegmentPolicy::from_str("first").is_err());

        assert_eq!(
            ObservationFailurePolicy::from_str("SKIP").unwrap(),
            ObservationFailurePolicy::Skip
        );
        assert!(ObservationFailurePolicy::from_str("ignore").is_err());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        for level in ["INFO", "Debug", "wArN"] {
            let config = ApplicationConfig {
                log_level: level.to_string(),
            };
            assert!(config.validate().is_ok(), "rejected: {level}");
        }
    }

    #[test]
    fn test_mapping_config_validation() {
        let mut config = MappingConfig::default();
        assert!(config.validate().is_ok());

        config.code_system = "  ".to_string();
        assert!(config.validate().is_err());

        config.code_system = "http://loinc.org".to_string();
        config.unit_system = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }
}
