//! Configuration management for Courier.
//!
//! # Overview
//!
//! Courier uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `COURIER_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use courier::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("courier.toml")?;
//!
//! println!("Code system: {}", config.mapping.code_system);
//! println!("Duplicates: {:?}", config.parser.duplicate_segments);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ParserConfig`] - Duplicate segment policy
//! - [`MappingConfig`] - Code systems, resource status, observation failure policy
//! - [`OutputConfig`] - JSON rendering
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [parser]
//! duplicate_segments = "last_write_wins"
//!
//! [mapping]
//! code_system = "http://loinc.org"
//! unit_system = "http://unitsofmeasure.org"
//! status = "final"
//! observation_failures = "abort"
//!
//! [output]
//! pretty = true
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CourierConfig, DuplicateSegmentPolicy, LoggingConfig, MappingConfig,
    ObservationFailurePolicy, OutputConfig, ParserConfig,
};

/// Serializes tests that read or mutate `COURIER_*` environment variables
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}
