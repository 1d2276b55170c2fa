//! Resource mapper
//!
//! Maps an [`IntermediateRecord`] to one [`DiagnosticReport`] and one
//! [`Observation`] per OBX segment.

use crate::config::{MappingConfig, ObservationFailurePolicy};
use crate::core::normalize::{coded_pair, first_component, parse_timestamp, Timestamp};
use crate::core::parse::segments::attr;
use crate::domain::errors::MappingError;
use crate::domain::ids::{PatientId, ResourceId};
use crate::domain::record::{attribute, AttributeMap, IntermediateRecord};
use crate::domain::resource::{
    CodeableConcept, DiagnosticReport, Observation, Quantity, Reference, ResourceStatus,
    ResourceType,
};
use crate::domain::segment::SegmentKind;
use serde::{Deserialize, Serialize};

/// Observation dropped under [`ObservationFailurePolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedObservation {
    /// Zero-based position among the record's OBX segments
    pub index: usize,

    /// OBX SetID, empty if absent
    pub set_id: String,

    /// Error kind, e.g. `ValueTypeError`
    pub kind: String,

    pub message: String,
}

/// Output of [`ResourceMapper::map`]
#[derive(Debug, Clone, PartialEq)]
pub struct MappedResources {
    pub report: DiagnosticReport,
    /// Mapped observations in OBX order
    pub observations: Vec<Observation>,
    pub skipped: Vec<SkippedObservation>,
}

/// Maps records using the configured code systems, status and failure policy
#[derive(Debug, Clone)]
pub struct ResourceMapper {
    code_system: String,
    unit_system: String,
    status: ResourceStatus,
    failures: ObservationFailurePolicy,
}

impl ResourceMapper {
    /// Creates a mapper from the mapping configuration
    pub fn new(config: &MappingConfig) -> Self {
        Self {
            code_system: config.code_system.clone(),
            unit_system: config.unit_system.clone(),
            status: config.status,
            failures: config.observation_failures,
        }
    }

    /// Maps a record to its report and observations
    ///
    /// Report-level failures are always fatal. Observation failures abort the
    /// mapping or are collected in [`MappedResources::skipped`] depending on the
    /// configured policy; when every observation fails the first error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] for malformed report fields, an empty patient
    /// identifier, or (under the `abort` policy) the first failing observation.
    pub fn map(&self, record: &IntermediateRecord) -> Result<MappedResources, MappingError> {
        tracing::info!(
            observations = record.observations().len(),
            "Mapping record to resources"
        );

        let report_id = ResourceId::generate();
        let subject = self.subject(record.patient())?;
        let code = self.code(
            record.request(),
            SegmentKind::Request,
            attr::UNIVERSAL_SERVICE_IDENTIFIER,
        )?;

        let effective_date_time = optional_timestamp(
            record.request(),
            SegmentKind::Request,
            attr::OBSERVATION_DATE_TIME,
        )?
        .map(|ts| ts.to_date_string());
        let issued = optional_timestamp(
            record.header(),
            SegmentKind::Header,
            attr::DATE_TIME_OF_MESSAGE,
        )?
        .map(|ts| ts.to_instant_string());

        let mut observations = Vec::with_capacity(record.observations().len());
        let mut skipped = Vec::new();
        let mut first_error = None;

        for (index, obx) in record.observations().iter().enumerate() {
            match self.observation(obx, &subject) {
                Ok(observation) => observations.push(observation),
                Err(err) => match self.failures {
                    ObservationFailurePolicy::Abort => return Err(err),
                    ObservationFailurePolicy::Skip => {
                        let entry = SkippedObservation {
                            index,
                            set_id: obx.get(attr::SET_ID).cloned().unwrap_or_default(),
                            kind: err.kind().to_string(),
                            message: err.to_string(),
                        };
                        tracing::warn!(
                            index = entry.index,
                            set_id = %entry.set_id,
                            kind = %entry.kind,
                            message = %entry.message,
                            "Skipping observation"
                        );
                        skipped.push(entry);
                        first_error.get_or_insert(err);
                    }
                },
            }
        }

        if observations.is_empty() {
            if let Some(err) = first_error {
                return Err(err);
            }
        }

        let result = observations
            .iter()
            .map(|o| Reference::to_resource(ResourceType::Observation, o.id))
            .collect();

        let report = DiagnosticReport {
            id: report_id,
            status: self.status,
            code,
            subject,
            effective_date_time,
            issued,
            result,
        };

        Ok(MappedResources {
            report,
            observations,
            skipped,
        })
    }

    fn subject(&self, patient: &AttributeMap) -> Result<Reference, MappingError> {
        let raw = attribute(patient, SegmentKind::Patient, attr::PATIENT_ID)?;
        let id = PatientId::new(first_component(raw)).map_err(|_| {
            MappingError::MissingAttribute {
                segment: SegmentKind::Patient,
                attribute: attr::PATIENT_ID.to_string(),
            }
        })?;
        Ok(Reference::patient(&id))
    }

    fn code(
        &self,
        attributes: &AttributeMap,
        segment: SegmentKind,
        name: &str,
    ) -> Result<CodeableConcept, MappingError> {
        let (code, display) = coded_pair(name, attribute(attributes, segment, name)?)?;
        Ok(CodeableConcept::single(&self.code_system, code, display))
    }

    fn observation(
        &self,
        obx: &AttributeMap,
        subject: &Reference,
    ) -> Result<Observation, MappingError> {
        let id = ResourceId::generate();
        let code = self.code(obx, SegmentKind::Observation, attr::OBSERVATION_IDENTIFIER)?;
        let value = numeric_value(attribute(
            obx,
            SegmentKind::Observation,
            attr::OBSERVATION_VALUE,
        )?)?;
        let unit = attribute(obx, SegmentKind::Observation, attr::UNITS)?;

        Ok(Observation {
            id,
            status: self.status,
            code,
            subject: subject.clone(),
            value_quantity: Quantity {
                value,
                unit: unit.to_string(),
                system: self.unit_system.clone(),
                code: unit.to_string(),
            },
        })
    }
}

/// Parses an observation value as a finite number
fn numeric_value(text: &str) -> Result<f64, MappingError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MappingError::ValueType {
            field: attr::OBSERVATION_VALUE.to_string(),
            value: text.to_string(),
        })
}

/// Timestamp attribute that may be malformed; a missing key is still an error
fn optional_timestamp(
    attributes: &AttributeMap,
    segment: SegmentKind,
    name: &str,
) -> Result<Option<Timestamp>, MappingError> {
    let raw = attribute(attributes, segment, name)?;
    match parse_timestamp(raw) {
        Ok(ts) => Ok(Some(ts)),
        Err(err) => {
            tracing::error!(
                segment = segment.tag(),
                attribute = name,
                error = %err,
                "Timestamp left out of report"
            );
            Ok(None)
        }
    }
}
