//! Conversion summary and reporting

use crate::core::transform::SkippedObservation;
use serde::Serialize;
use std::time::Duration;

/// Summary of one conversion run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionSummary {
    /// MSH MessageControlID, when a record was produced
    pub message_control_id: Option<String>,

    /// Non-empty lines in the input
    pub total_segments: usize,

    /// Segments whose tag is not modeled
    pub ignored_segments: usize,

    /// Observations that became resources
    pub observations_mapped: usize,

    /// Observations dropped under the skip policy
    pub skipped: Vec<SkippedObservation>,

    /// NTE segments carried in the record
    pub notes: usize,

    /// Entries in the produced bundle
    pub bundle_entries: usize,

    #[serde(skip)]
    pub duration: Duration,
}

impl ConversionSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of skipped observations
    pub fn observations_skipped(&self) -> usize {
        self.skipped.len()
    }

    /// Whether every observation made it into the bundle
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            message_control_id = self.message_control_id.as_deref().unwrap_or(""),
            total_segments = self.total_segments,
            ignored_segments = self.ignored_segments,
            observations_mapped = self.observations_mapped,
            observations_skipped = self.observations_skipped(),
            bundle_entries = self.bundle_entries,
            duration_ms = self.duration.as_millis() as u64,
            "Conversion summary"
        );

        for skipped in &self.skipped {
            tracing::warn!(
                index = skipped.index,
                set_id = %skipped.set_id,
                kind = %skipped.kind,
                message = %skipped.message,
                "Observation left out of bundle"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_defaults() {
        let summary = ConversionSummary::new();
        assert_eq!(summary.total_segments, 0);
        assert_eq!(summary.observations_skipped(), 0);
        assert!(summary.is_complete());
        assert_eq!(summary.duration, Duration::ZERO);
    }

    #[test]
    fn test_summary_with_skips() {
        let mut summary = ConversionSummary::new().with_duration(Duration::from_millis(12));
        summary.skipped.push(SkippedObservation {
            index: 1,
            set_id: "2".to_string(),
            kind: "ValueTypeError".to_string(),
            message: "Field ObservationValue is not numeric: 'high'".to_string(),
        });

        assert_eq!(summary.observations_skipped(), 1);
        assert!(!summary.is_complete());
        assert_eq!(summary.duration, Duration::from_millis(12));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["skipped"][0]["kind"], "ValueTypeError");
        assert!(json.get("duration").is_none());
    }
}
