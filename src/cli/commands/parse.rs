//! Parse command implementation
//!
//! HL7 v2 message text to intermediate record JSON.

use super::{emit, load_or_report, IoArgs};
use crate::core::convert::Converter;
use clap::Args;

/// Arguments for the parse command
#[derive(Args, Debug)]
pub struct ParseArgs {
    #[command(flatten)]
    pub io: IoArgs,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.io.input, "Starting parse command");

        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let text = self.io.read_input()?;
        let converter = Converter::new(config);
        let result = converter.parse(&text);
        emit(&converter, &self.io, result)
    }
}
