//! CLI command implementations
//!
//! The conversion commands share input/output handling and the way results
//! and errors are reported.

pub mod bundle;
pub mod convert;
pub mod init;
pub mod parse;
pub mod validate;

use crate::config::{load_config_or_default, CourierConfig};
use crate::core::convert::{Conversion, ConversionSummary, Converter};
use crate::domain::Result;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};

/// Input and output locations of a conversion command
#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Input file, or `-` for stdin
    #[arg(short, long)]
    pub input: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,
}

impl IoArgs {
    /// Reads the whole input
    pub fn read_input(&self) -> io::Result<String> {
        if self.input == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        } else {
            fs::read_to_string(&self.input)
        }
    }

    /// Writes `content` followed by a newline
    pub fn write_output(&self, content: &str) -> io::Result<()> {
        match &self.output {
            Some(path) => fs::write(path, format!("{content}\n")),
            None => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{content}")?;
                stdout.flush()
            }
        }
    }
}

/// Loads configuration, printing the failure and returning `None` on error
pub(crate) fn load_or_report(config_path: &str) -> Option<CourierConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::error!(error = %e, config_path = %config_path, "Failed to load configuration");
            eprintln!("❌ Failed to load configuration: {e}");
            None
        }
    }
}

/// Writes a stage result (or its error report) and maps it to an exit code
pub(crate) fn emit<T: Serialize>(
    converter: &Converter,
    io_args: &IoArgs,
    result: Result<Conversion<T>>,
) -> anyhow::Result<i32> {
    match result {
        Ok(conversion) => {
            io_args.write_output(&converter.render(&conversion.output)?)?;
            conversion.summary.log_summary();
            print_summary(&conversion.summary);
            Ok(0)
        }
        Err(e) => {
            io_args.write_output(&converter.render_error(&e)?)?;
            eprintln!("❌ Conversion failed ({}): {e}", e.kind());
            Ok(3)
        }
    }
}

fn print_summary(summary: &ConversionSummary) {
    eprintln!("✅ Conversion completed");
    if let Some(id) = &summary.message_control_id {
        eprintln!("  Message: {id}");
    }
    if summary.total_segments > 0 {
        eprintln!(
            "  Segments: {} ({} ignored)",
            summary.total_segments, summary.ignored_segments
        );
    }
    if summary.bundle_entries > 0 {
        eprintln!("  Bundle entries: {}", summary.bundle_entries);
        eprintln!("  Observations mapped: {}", summary.observations_mapped);
    }
    if !summary.is_complete() {
        eprintln!("  ⚠️  Observations skipped: {}", summary.observations_skipped());
        for skipped in &summary.skipped {
            eprintln!(
                "     #{} (SetID {}): {}",
                skipped.index, skipped.set_id, skipped.message
            );
        }
    }
    eprintln!("  Duration: {} ms", summary.duration.as_millis());
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_io_args_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.hl7");
        let output = dir.path().join("out.json");
        fs::write(&input, "MSH|a").unwrap();

        let args = IoArgs {
            input: input.to_string_lossy().to_string(),
            output: Some(output.to_string_lossy().to_string()),
        };
        assert_eq!(args.read_input().unwrap(), "MSH|a");

        args.write_output("{}").unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "{}\n");
    }

    #[test]
    fn test_io_args_missing_input() {
        let args = IoArgs {
            input: "does-not-exist.hl7".to_string(),
            output: None,
        };
        assert!(args.read_input().is_err());
    }
}
