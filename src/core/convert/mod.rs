//! Conversion orchestration
//!
//! [`Converter`] runs the pipeline stages with one configuration and reports a
//! [`ConversionSummary`] for each run. Every run builds fresh structures; a
//! converter holds no per-message state.

pub mod summary;

pub use summary::ConversionSummary;

use crate::config::CourierConfig;
use crate::core::parse::{parse_message, tokenize};
use crate::core::transform::transform_record;
use crate::domain::bundle::Bundle;
use crate::domain::errors::ErrorReport;
use crate::domain::record::IntermediateRecord;
use crate::domain::segment::SegmentKind;
use crate::domain::{CourierError, Result};
use crate::{log_conversion_complete, log_conversion_start, log_error_with_context};
use serde::Serialize;
use std::time::Instant;

/// Output of one stage together with its summary
#[derive(Debug, Clone)]
pub struct Conversion<T> {
    pub output: T,
    pub summary: ConversionSummary,
}

/// Pipeline driver
#[derive(Debug, Clone)]
pub struct Converter {
    config: CourierConfig,
}

impl Converter {
    /// Create a converter
    pub fn new(config: CourierConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// HL7 text to intermediate record
    ///
    /// # Errors
    ///
    /// Returns the parsing error of the first malformed or missing segment.
    pub fn parse(&self, text: &str) -> Result<Conversion<IntermediateRecord>> {
        let start = Instant::now();
        log_conversion_start!("parse", "message text");

        let record = self.parse_text(text)?;
        let mut summary = segment_counts(text);
        describe_record(&mut summary, &record);

        let summary = summary.with_duration(start.elapsed());
        log_conversion_complete!("parse", summary.total_segments, summary.duration);
        Ok(Conversion {
            output: record,
            summary,
        })
    }

    /// Intermediate record to transaction bundle
    ///
    /// # Errors
    ///
    /// Returns the mapping error that aborted the run.
    pub fn bundle_record(&self, record: &IntermediateRecord) -> Result<Conversion<Bundle>> {
        let start = Instant::now();
        log_conversion_start!("bundle", "intermediate record");

        let mut summary = ConversionSummary::new();
        describe_record(&mut summary, record);
        let bundle = self.bundle_into(record, &mut summary)?;

        let summary = summary.with_duration(start.elapsed());
        log_conversion_complete!("bundle", summary.bundle_entries, summary.duration);
        Ok(Conversion {
            output: bundle,
            summary,
        })
    }

    /// Intermediate record JSON to transaction bundle
    ///
    /// # Errors
    ///
    /// Returns a serialization error for malformed JSON, the missing-segment
    /// error for a record lacking a required segment, or the mapping error that
    /// aborted the run.
    pub fn bundle_json(&self, text: &str) -> Result<Conversion<Bundle>> {
        let record = IntermediateRecord::from_json(text).map_err(|err| {
            log_error_with_context!(&err, "Record loading failed");
            err
        })?;
        self.bundle_record(&record)
    }

    /// HL7 text to transaction bundle
    ///
    /// # Errors
    ///
    /// Returns the first parsing or mapping error.
    pub fn convert_message(&self, text: &str) -> Result<Conversion<Bundle>> {
        let start = Instant::now();
        log_conversion_start!("convert", "message text");

        let record = self.parse_text(text)?;
        let mut summary = segment_counts(text);
        describe_record(&mut summary, &record);
        let bundle = self.bundle_into(&record, &mut summary)?;

        let summary = summary.with_duration(start.elapsed());
        log_conversion_complete!("convert", summary.bundle_entries, summary.duration);
        Ok(Conversion {
            output: bundle,
            summary,
        })
    }

    /// Serializes `value` honoring the `output.pretty` setting
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `value` cannot be represented as JSON.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.config.output.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Serializes the structured error value for `err`
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the report cannot be rendered.
    pub fn render_error(&self, err: &CourierError) -> Result<String> {
        self.render(&ErrorReport::from(err))
    }

    fn parse_text(&self, text: &str) -> Result<IntermediateRecord> {
        parse_message(text, self.config.parser.duplicate_segments).map_err(|e| {
            let err = CourierError::from(e);
            log_error_with_context!(&err, "Message parsing failed");
            err
        })
    }

    fn bundle_into(
        &self,
        record: &IntermediateRecord,
        summary: &mut ConversionSummary,
    ) -> Result<Bundle> {
        let transformed = transform_record(record, &self.config.mapping).map_err(|err| {
            log_error_with_context!(&err, "Resource mapping failed");
            err
        })?;

        summary.observations_mapped = transformed.bundle.len().saturating_sub(1);
        summary.bundle_entries = transformed.bundle.len();
        summary.skipped = transformed.skipped;
        Ok(transformed.bundle)
    }
}

/// Counts segments in a second pass over the text
fn segment_counts(text: &str) -> ConversionSummary {
    let mut summary = ConversionSummary::new();
    for segment in tokenize(text) {
        summary.total_segments += 1;
        if SegmentKind::from_tag(segment.tag()).is_none() {
            summary.ignored_segments += 1;
        }
    }
    summary
}

fn describe_record(summary: &mut ConversionSummary, record: &IntermediateRecord) {
    summary.message_control_id = record
        .header()
        .get(crate::core::parse::segments::attr::MESSAGE_CONTROL_ID)
        .cloned();
    summary.notes = record.notes().len();
}
