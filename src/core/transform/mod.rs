//! Record transformation
//!
//! Converts an [`IntermediateRecord`] into a transaction [`Bundle`] in two steps:
//!
//! - [`mapper`] maps record attributes to a report and its observations
//! - [`bundle`] wraps the resources in transaction entries

pub mod bundle;
pub mod mapper;

pub use bundle::build_transaction;
pub use mapper::{MappedResources, ResourceMapper, SkippedObservation};

use crate::config::MappingConfig;
use crate::domain::bundle::Bundle;
use crate::domain::record::IntermediateRecord;
use crate::domain::Result;

/// Bundle produced from one record, plus any observations left out of it
#[derive(Debug, Clone)]
pub struct Transformed {
    pub bundle: Bundle,
    pub skipped: Vec<SkippedObservation>,
}

/// Transforms a record into a transaction bundle
///
/// This is the main entry point for record transformation.
///
/// # Examples
///
/// ```
/// use courier::config::MappingConfig;
/// use courier::core::transform::transform_record;
/// use courier::domain::IntermediateRecord;
/// use serde_json::json;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let record: IntermediateRecord = serde_json::from_value(json!({
///     "MSH": { "DateTimeOfMessage": "202401151030" },
///     "PID": { "PatientID": "PAT123^^^HOSP" },
///     "ORC": {},
///     "OBR": {
///         "UniversalServiceIdentifier": "1234-5^Glucose",
///         "ObservationDateTime": "20240115"
///     },
///     "OBX": [{
///         "ObservationIdentifier": "5678-9^Sodium",
///         "ObservationValue": "140",
///         "Units": "mmol/L"
///     }]
/// }))?;
///
/// let transformed = transform_record(&record, &MappingConfig::default())?;
/// assert_eq!(transformed.bundle.len(), 2);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub fn transform_record(record: &IntermediateRecord, config: &MappingConfig) -> Result<Transformed> {
    let mapped = ResourceMapper::new(config).map(record)?;
    Ok(Transformed {
        bundle: build_transaction(mapped.report, mapped.observations),
        skipped: mapped.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::CourierError;
    use crate::domain::resource::{Resource, ResourceType};
    use serde_json::json;

    fn record(observation_date: &str) -> IntermediateRecord {
        serde_json::from_value(json!({
            "MSH": { "DateTimeOfMessage": "202401151030" },
            "PID": { "PatientID": "PAT123^^^HOSP" },
            "ORC": { "OrderControl": "RE" },
            "OBR": {
                "UniversalServiceIdentifier": "1234-5^Glucose",
                "ObservationDateTime": observation_date
            },
            "OBX": [
                { "SetID": "1", "ObservationIdentifier": "5678-9^Sodium", "ObservationValue": "140", "Units": "mmol/L" },
                { "SetID": "2", "ObservationIdentifier": "2345-7^Potassium", "ObservationValue": "4.1", "Units": "mmol/L" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_transform_record_references_are_consistent() {
        let transformed = transform_record(&record("20240115"), &MappingConfig::default()).unwrap();
        let bundle = &transformed.bundle;
        assert_eq!(bundle.len(), 3);
        assert!(transformed.skipped.is_empty());

        let Resource::DiagnosticReport(report) = &bundle.entries()[0].resource else {
            panic!("first entry must be the report");
        };

        let observation_refs: Vec<String> = bundle
            .entries_of(ResourceType::Observation)
            .map(|e| format!("Observation/{}", e.resource.id()))
            .collect();
        let result_refs: Vec<String> = report.result.iter().map(|r| r.reference.clone()).collect();
        assert_eq!(result_refs, observation_refs);

        for entry in bundle.entries() {
            assert_eq!(entry.resource.subject(), &report.subject);
        }
    }

    #[test]
    fn test_transform_record_wraps_mapping_errors() {
        let mut value = serde_json::to_value(record("20240115")).unwrap();
        value["OBX"][1]["ObservationValue"] = "pending".into();
        let record: IntermediateRecord = serde_json::from_value(value).unwrap();

        let err = transform_record(&record, &MappingConfig::default()).unwrap_err();
        assert!(matches!(err, CourierError::Mapping(_)));
        assert_eq!(err.kind(), "ValueTypeError");
    }
}
