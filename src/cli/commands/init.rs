//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "courier.toml")]
    pub output: String,

    /// Include comments explaining each setting
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Courier configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: courier validate-config");
                println!("  3. Convert a message: courier convert --input message.hl7");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Courier Configuration File
# HL7 v2 result messages to FHIR transaction bundles

[application]
log_level = "info"

[parser]
duplicate_segments = "last_write_wins"

[mapping]
code_system = "http://loinc.org"
unit_system = "http://unitsofmeasure.org"
status = "final"
observation_failures = "abort"

[output]
pretty = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with comments
    fn generate_config_with_examples() -> String {
        r#"# Courier Configuration File
# HL7 v2 result messages to FHIR transaction bundles
#
# Every setting below shows its default. Any value can be overridden with a
# COURIER_<SECTION>_<KEY> environment variable, e.g. COURIER_MAPPING_STATUS.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Parser Settings
# ============================================================================
[parser]
# What to do when MSH, PID, ORC or OBR appears more than once:
# - last_write_wins: keep the last occurrence and log a warning
# - reject: fail the message with DuplicateSegmentError
duplicate_segments = "last_write_wins"

# ============================================================================
# Mapping Settings
# ============================================================================
[mapping]
# Code system of report and observation codes
code_system = "http://loinc.org"

# Code system of observation units
unit_system = "http://unitsofmeasure.org"

# Status of every generated resource
# (registered, preliminary, final, amended, corrected)
status = "final"

# What to do when a single OBX cannot be mapped:
# - abort: fail the whole message
# - skip: leave it out of the bundle and report it
observation_failures = "abort"

# ============================================================================
# Output Settings
# ============================================================================
[output]
# Pretty-print JSON output
pretty = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Write JSON log files in addition to console output
local_enabled = false

# Directory for log files
local_path = "./logs"

# Rotation strategy (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
