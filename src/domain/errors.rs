//! Domain error types
//!
//! Errors are layered the same way the pipeline is: [`Hl7Error`] covers the
//! parsing stage, [`MappingError`] covers the resource mapping stage, and
//! [`CourierError`] wraps both together with the ambient failures (configuration,
//! I/O, serialization). Every variant has a stable kind string so callers can
//! emit a structured [`ErrorReport`] instead of a bare message.

use super::segment::SegmentKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main Courier error type
#[derive(Debug, Error)]
pub enum CourierError {
    /// Parsing-stage errors
    #[error("HL7 error: {0}")]
    Hl7(#[from] Hl7Error),

    /// Mapping-stage errors
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CourierError {
    /// Stable error kind, e.g. `MissingSegmentError`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hl7(e) => e.kind(),
            Self::Mapping(e) => e.kind(),
            Self::Configuration(_) => "ConfigurationError",
            Self::Io(_) => "IoError",
            Self::Serialization(_) => "SerializationError",
        }
    }
}

/// Errors raised while tokenizing and assembling a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Hl7Error {
    /// A segment has fewer fields than its type requires
    #[error("{segment} segment does not have enough fields: expected at least {required}, found {found}")]
    Structure {
        segment: SegmentKind,
        required: usize,
        found: usize,
    },

    /// A required segment type never appeared
    #[error("Required segment {0} is missing")]
    MissingSegment(SegmentKind),

    /// A singleton segment appeared more than once under the `reject` policy
    #[error("Segment {0} appears more than once")]
    DuplicateSegment(SegmentKind),
}

impl Hl7Error {
    /// Stable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Structure { .. } => "StructureError",
            Self::MissingSegment(_) => "MissingSegmentError",
            Self::DuplicateSegment(_) => "DuplicateSegmentError",
        }
    }
}

/// Errors raised while mapping the intermediate record to resources
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A composite field has fewer components than required
    #[error("Field {field} has {found} component(s), expected at least {expected}: '{value}'")]
    CompositeField {
        field: String,
        value: String,
        expected: usize,
        found: usize,
    },

    /// A field expected to be numeric is not
    #[error("Field {field} is not numeric: '{value}'")]
    ValueType { field: String, value: String },

    /// A timestamp matched none of the recognized patterns
    #[error("Unable to parse date string: '{0}'")]
    DateFormat(String),

    /// An attribute is absent from the record or empty where a value is required
    #[error("{segment} attribute {attribute} is missing or empty")]
    MissingAttribute {
        segment: SegmentKind,
        attribute: String,
    },
}

impl MappingError {
    /// Stable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CompositeField { .. } => "CompositeFieldError",
            Self::ValueType { .. } => "ValueTypeError",
            Self::DateFormat(_) => "DateFormatError",
            Self::MissingAttribute { .. } => "MissingAttributeError",
        }
    }
}

/// Structured error value emitted in place of a record or bundle
///
/// Serializes as `{"error": {"kind": "...", "message": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: ErrorBody,
}

/// Kind and message of an [`ErrorReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

impl From<&CourierError> for ErrorReport {
    fn from(err: &CourierError) -> Self {
        let message = match err {
            CourierError::Hl7(e) => e.to_string(),
            CourierError::Mapping(e) => e.to_string(),
            other => other.to_string(),
        };
        Self {
            error: ErrorBody {
                kind: err.kind().to_string(),
                message,
            },
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CourierError {
    fn from(err: std::io::Error) -> Self {
        CourierError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CourierError {
    fn from(err: serde_json::Error) -> Self {
        CourierError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CourierError {
    fn from(err: toml::de::Error) -> Self {
        CourierError::Configuration(format!("TOML parse error: {err}"))
    }
}
