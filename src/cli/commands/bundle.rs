//! Bundle command implementation
//!
//! Intermediate record JSON to transaction bundle JSON.

use super::{emit, load_or_report, IoArgs};
use crate::config::ObservationFailurePolicy;
use crate::core::convert::Converter;
use clap::Args;

/// Arguments for the bundle command
#[derive(Args, Debug)]
pub struct BundleArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Drop observations that fail to map instead of failing the record
    #[arg(long)]
    pub skip_invalid: bool,
}

impl BundleArgs {
    /// Execute the bundle command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.io.input, "Starting bundle command");

        let Some(mut config) = load_or_report(config_path) else {
            return Ok(2);
        };
        if self.skip_invalid {
            config.mapping.observation_failures = ObservationFailurePolicy::Skip;
        }

        let text = self.io.read_input()?;
        let converter = Converter::new(config);
        let result = converter.bundle_json(&text);
        emit(&converter, &self.io, result)
    }
}
