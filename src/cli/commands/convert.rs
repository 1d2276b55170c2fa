//! Convert command implementation
//!
//! HL7 v2 message text to transaction bundle JSON.

use super::{emit, load_or_report, IoArgs};
use crate::config::ObservationFailurePolicy;
use crate::core::convert::Converter;
use clap::Args;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub io: IoArgs,

    /// Drop observations that fail to map instead of failing the message
    #[arg(long)]
    pub skip_invalid: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.io.input, "Starting convert command");

        let Some(mut config) = load_or_report(config_path) else {
            return Ok(2);
        };
        if self.skip_invalid {
            tracing::info!("Skipping invalid observations from CLI");
            config.mapping.observation_failures = ObservationFailurePolicy::Skip;
        }

        let text = self.io.read_input()?;
        let converter = Converter::new(config);
        let result = converter.convert_message(&text);
        emit(&converter, &self.io, result)
    }
}
