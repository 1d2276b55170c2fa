//! Segment field tables and parsers
//!
//! Each modeled segment type has a fixed table of `(index, attribute, presence)`
//! entries. Indices are positions in the `|`-split line with the tag at 0, which
//! matches HL7 v2 field numbering for every segment except MSH (where the field
//! separator is MSH-1, so index `n` holds MSH-`n+1`). The tables are the
//! compatibility contract with upstream senders; change them only together
//! with the field numbering they mirror.

use super::tokenizer::RawSegment;
use crate::domain::errors::Hl7Error;
use crate::domain::record::AttributeMap;
use crate::domain::segment::SegmentKind;

/// Attribute names used in the intermediate record
pub mod attr {
    pub const SENDING_APPLICATION: &str = "SendingApplication";
    pub const SENDING_FACILITY: &str = "SendingFacility";
    pub const RECEIVING_APPLICATION: &str = "ReceivingApplication";
    pub const RECEIVING_FACILITY: &str = "ReceivingFacility";
    pub const DATE_TIME_OF_MESSAGE: &str = "DateTimeOfMessage";
    pub const MESSAGE_TYPE: &str = "MessageType";
    pub const MESSAGE_CONTROL_ID: &str = "MessageControlID";
    pub const PROCESSING_ID: &str = "ProcessingID";
    pub const VERSION_ID: &str = "VersionID";

    pub const PATIENT_ID: &str = "PatientID";
    pub const PATIENT_NAME: &str = "PatientName";
    pub const DATE_OF_BIRTH: &str = "DateOfBirth";
    pub const SEX: &str = "Sex";
    pub const ADDRESS: &str = "Address";

    pub const ORDER_CONTROL: &str = "OrderControl";
    pub const PLACER_ORDER_NUMBER: &str = "PlacerOrderNumber";
    pub const FILLER_ORDER_NUMBER: &str = "FillerOrderNumber";
    pub const ORDER_STATUS: &str = "OrderStatus";
    pub const DATE_TIME_OF_TRANSACTION: &str = "DateTimeOfTransaction";

    pub const SET_ID: &str = "SetID";
    pub const UNIVERSAL_SERVICE_IDENTIFIER: &str = "UniversalServiceIdentifier";
    pub const OBSERVATION_DATE_TIME: &str = "ObservationDateTime";
    pub const ORDERING_PROVIDER: &str = "OrderingProvider";

    pub const VALUE_TYPE: &str = "ValueType";
    pub const OBSERVATION_IDENTIFIER: &str = "ObservationIdentifier";
    pub const OBSERVATION_VALUE: &str = "ObservationValue";
    pub const UNITS: &str = "Units";
    pub const REFERENCE_RANGE: &str = "ReferenceRange";
    pub const ABNORMAL_FLAGS: &str = "AbnormalFlags";
    pub const OBSERVATION_RESULT_STATUS: &str = "ObservationResultStatus";

    pub const SOURCE_OF_COMMENT: &str = "SourceOfComment";
    pub const COMMENT: &str = "Comment";
}

/// Whether a field must lie within the segment's minimum field count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Read as empty text when the segment is too short
    Optional,
}

/// One positional field of a segment table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub index: usize,
    pub name: &'static str,
    pub presence: Presence,
}

const fn required(index: usize, name: &'static str) -> FieldSpec {
    FieldSpec {
        index,
        name,
        presence: Presence::Required,
    }
}

const fn optional(index: usize, name: &'static str) -> FieldSpec {
    FieldSpec {
        index,
        name,
        presence: Presence::Optional,
    }
}

/// Field table of one segment type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpec {
    pub kind: SegmentKind,
    /// Minimum number of `|`-separated fields, tag included
    pub min_fields: usize,
    pub fields: &'static [FieldSpec],
}

pub static HEADER: SegmentSpec = SegmentSpec {
    kind: SegmentKind::Header,
    min_fields: 12,
    fields: &[
        required(2, attr::SENDING_APPLICATION),
        required(3, attr::SENDING_FACILITY),
        required(4, attr::RECEIVING_APPLICATION),
        required(5, attr::RECEIVING_FACILITY),
        required(6, attr::DATE_TIME_OF_MESSAGE),
        required(8, attr::MESSAGE_TYPE),
        required(9, attr::MESSAGE_CONTROL_ID),
        required(10, attr::PROCESSING_ID),
        required(11, attr::VERSION_ID),
    ],
};

pub static PATIENT: SegmentSpec = SegmentSpec {
    kind: SegmentKind::Patient,
    min_fields: 9,
    fields: &[
        required(3, attr::PATIENT_ID),
        required(5, attr::PATIENT_NAME),
        required(7, attr::DATE_OF_BIRTH),
        required(8, attr::SEX),
        optional(11, attr::ADDRESS),
    ],
};

pub static ORDER: SegmentSpec = SegmentSpec {
    kind: SegmentKind::Order,
    min_fields: 6,
    fields: &[
        required(1, attr::ORDER_CONTROL),
        required(2, attr::PLACER_ORDER_NUMBER),
        required(3, attr::FILLER_ORDER_NUMBER),
        required(5, attr::ORDER_STATUS),
        optional(9, attr::DATE_TIME_OF_TRANSACTION),
    ],
};

pub static REQUEST: SegmentSpec = SegmentSpec {
    kind: SegmentKind::Request,
    min_fields: 8,
    fields: &[
        required(1, attr::SET_ID),
        required(2, attr::PLACER_ORDER_NUMBER),
        required(3, attr::FILLER_ORDER_NUMBER),
        required(4, attr::UNIVERSAL_SERVICE_IDENTIFIER),
        required(7, attr::OBSERVATION_DATE_TIME),
        optional(16, attr::ORDERING_PROVIDER),
    ],
};

pub static OBSERVATION: SegmentSpec = SegmentSpec {
    kind: SegmentKind::Observation,
    min_fields: 12,
    fields: &[
        required(1, attr::SET_ID),
        required(2, attr::VALUE_TYPE),
        required(3, attr::OBSERVATION_IDENTIFIER),
        required(5, attr::OBSERVATION_VALUE),
        required(6, attr::UNITS),
        required(7, attr::REFERENCE_RANGE),
        required(8, attr::ABNORMAL_FLAGS),
        required(11, attr::OBSERVATION_RESULT_STATUS),
    ],
};

pub static NOTE: SegmentSpec = SegmentSpec {
    kind: SegmentKind::Note,
    min_fields: 4,
    fields: &[
        required(1, attr::SET_ID),
        required(2, attr::SOURCE_OF_COMMENT),
        required(3, attr::COMMENT),
    ],
};

/// Field table for a segment type
pub fn spec_for(kind: SegmentKind) -> &'static SegmentSpec {
    match kind {
        SegmentKind::Header => &HEADER,
        SegmentKind::Patient => &PATIENT,
        SegmentKind::Order => &ORDER,
        SegmentKind::Request => &REQUEST,
        SegmentKind::Observation => &OBSERVATION,
        SegmentKind::Note => &NOTE,
    }
}

/// Extracts the attributes of `segment` according to `spec`
///
/// # Errors
///
/// Returns [`Hl7Error::Structure`] when the segment has fewer fields than
/// `spec.min_fields`.
///
/// # Examples
///
/// ```
/// use courier::core::parse::segments::{parse_segment, NOTE};
/// use courier::core::parse::RawSegment;
///
/// let attrs = parse_segment(&NOTE, &RawSegment::parse("NTE|1|L|Fasting sample")).unwrap();
/// assert_eq!(attrs["Comment"], "Fasting sample");
/// ```
pub fn parse_segment(
    spec: &SegmentSpec,
    segment: &RawSegment<'_>,
) -> Result<AttributeMap, Hl7Error> {
    let structure_error = || Hl7Error::Structure {
        segment: spec.kind,
        required: spec.min_fields,
        found: segment.len(),
    };

    if segment.len() < spec.min_fields {
        return Err(structure_error());
    }

    let mut attributes = AttributeMap::new();
    for field in spec.fields {
        let value = match field.presence {
            Presence::Required => segment.field(field.index).ok_or_else(structure_error)?,
            Presence::Optional => segment.field_or_empty(field.index),
        };
        attributes.insert(field.name.to_string(), value.to_string());
    }

    Ok(attributes)
}
