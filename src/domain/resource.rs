//! Resource graph produced by the mapper
//!
//! Field names follow FHIR R4 JSON so the graph can be serialized directly.
//! Resources reference each other only through `Reference` strings.

use super::ids::{PatientId, ResourceId};
use serde::{Deserialize, Serialize};

/// Resource status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    Registered,
    Preliminary,
    #[default]
    Final,
    Amended,
    Corrected,
}

/// A single code from a code system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coding {
    pub system: String,
    pub code: String,
    pub display: String,
}

/// Coded concept holding one or more codings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

impl CodeableConcept {
    /// Concept with a single coding
    pub fn single(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            coding: vec![Coding {
                system: system.into(),
                code: code.into(),
                display: display.into(),
            }],
        }
    }

    /// First coding, if any
    pub fn primary(&self) -> Option<&Coding> {
        self.coding.first()
    }
}

/// Literal reference such as `Patient/PAT123` or `Observation/<uuid>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    /// Reference to a patient by identifier
    pub fn patient(id: &PatientId) -> Self {
        Self {
            reference: format!("Patient/{id}"),
        }
    }

    /// Reference to a generated resource
    pub fn to_resource(resource_type: ResourceType, id: ResourceId) -> Self {
        Self {
            reference: format!("{}/{id}", resource_type.as_str()),
        }
    }
}

/// Measured value with unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    pub system: String,
    pub code: String,
}

/// Resource type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    DiagnosticReport,
    Observation,
}

impl ResourceType {
    /// Type name, also used as the transaction target collection
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiagnosticReport => "DiagnosticReport",
            Self::Observation => "Observation",
        }
    }
}

/// Report resource built from OBR/MSH/PID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub id: ResourceId,
    pub status: ResourceStatus,
    pub code: CodeableConcept,
    pub subject: Reference,

    /// Date of observation (`YYYY-MM-DD`), absent when the source timestamp is malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,

    /// Message instant (`YYYY-MM-DDTHH:MM:SSZ`), absent when the source timestamp is malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,

    pub result: Vec<Reference>,
}

/// Observation resource built from one OBX
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: ResourceId,
    pub status: ResourceStatus,
    pub code: CodeableConcept,
    pub subject: Reference,
    pub value_quantity: Quantity,
}

/// Any resource that can appear in a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    DiagnosticReport(DiagnosticReport),
    Observation(Observation),
}

impl Resource {
    /// Type tag of the wrapped resource
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::DiagnosticReport(_) => ResourceType::DiagnosticReport,
            Self::Observation(_) => ResourceType::Observation,
        }
    }

    /// Identity of the wrapped resource
    pub fn id(&self) -> ResourceId {
        match self {
            Self::DiagnosticReport(r) => r.id,
            Self::Observation(o) => o.id,
        }
    }

    /// Subject reference of the wrapped resource
    pub fn subject(&self) -> &Reference {
        match self {
            Self::DiagnosticReport(r) => &r.subject,
            Self::Observation(o) => &o.subject,
        }
    }
}

impl From<DiagnosticReport> for Resource {
    fn from(report: DiagnosticReport) -> Self {
        Self::DiagnosticReport(report)
    }
}

impl From<Observation> for Resource {
    fn from(observation: Observation) -> Self {
        Self::Observation(observation)
    }
}
