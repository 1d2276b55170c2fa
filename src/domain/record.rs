//! Intermediate record
//!
//! The normalized hand-off between parsing and mapping. Its JSON form is keyed
//! by segment tag and is stable:
//!
//! ```json
//! {
//!   "MSH": { "DateTimeOfMessage": "202401151030", ... },
//!   "PID": { "PatientID": "PAT123^^^HOSP", ... },
//!   "ORC": { ... },
//!   "OBR": { ... },
//!   "OBX": [ { "ObservationIdentifier": "5678-9^Sodium", ... } ],
//!   "NTE": [ ... ]
//! }
//! ```
//!
//! `NTE` is omitted when the message carried no notes.

use super::errors::{CourierError, Hl7Error, MappingError};
use super::segment::SegmentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute name to raw field text
pub type AttributeMap = BTreeMap<String, String>;

/// Parsed message, keyed by segment type
///
/// A record always holds every required segment and at least one observation;
/// deserialization applies the same checks as the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordDocument")]
pub struct IntermediateRecord {
    #[serde(rename = "MSH")]
    header: AttributeMap,

    #[serde(rename = "PID")]
    patient: AttributeMap,

    #[serde(rename = "ORC")]
    order: AttributeMap,

    #[serde(rename = "OBR")]
    request: AttributeMap,

    #[serde(rename = "OBX")]
    observations: Vec<AttributeMap>,

    #[serde(rename = "NTE", default, skip_serializing_if = "Vec::is_empty")]
    notes: Vec<AttributeMap>,
}

impl IntermediateRecord {
    /// Creates a record from its parts
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::MissingSegment`] naming OBX when `observations` is empty.
    pub fn new(
        header: AttributeMap,
        patient: AttributeMap,
        order: AttributeMap,
        request: AttributeMap,
        observations: Vec<AttributeMap>,
        notes: Vec<AttributeMap>,
    ) -> Result<Self, Hl7Error> {
        if observations.is_empty() {
            return Err(Hl7Error::MissingSegment(SegmentKind::Observation));
        }
        Ok(Self {
            header,
            patient,
            order,
            request,
            observations,
            notes,
        })
    }

    /// MSH attributes
    pub fn header(&self) -> &AttributeMap {
        &self.header
    }

    /// PID attributes
    pub fn patient(&self) -> &AttributeMap {
        &self.patient
    }

    /// ORC attributes
    pub fn order(&self) -> &AttributeMap {
        &self.order
    }

    /// OBR attributes
    pub fn request(&self) -> &AttributeMap {
        &self.request
    }

    /// OBX attributes in message order
    pub fn observations(&self) -> &[AttributeMap] {
        &self.observations
    }

    /// NTE attributes in message order
    pub fn notes(&self) -> &[AttributeMap] {
        &self.notes
    }

    /// Loads a record from its JSON form
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Serialization`] for malformed JSON and
    /// [`Hl7Error::MissingSegment`] naming the first absent segment, checked in
    /// the same order as the assembler, for a document missing a required segment.
    pub fn from_json(text: &str) -> Result<Self, CourierError> {
        let doc: RecordDocument = serde_json::from_str(text)?;
        Ok(Self::try_from(doc)?)
    }
}

/// Looks up an attribute, failing when the key is absent
///
/// An empty value is returned as-is; whether it is acceptable is up to the caller.
pub fn attribute<'a>(
    attributes: &'a AttributeMap,
    segment: SegmentKind,
    name: &str,
) -> Result<&'a str, MappingError> {
    attributes
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| MappingError::MissingAttribute {
            segment,
            attribute: name.to_string(),
        })
}

/// Unvalidated serde shape of [`IntermediateRecord`]
#[derive(Deserialize)]
struct RecordDocument {
    #[serde(rename = "MSH")]
    header: Option<AttributeMap>,
    #[serde(rename = "PID")]
    patient: Option<AttributeMap>,
    #[serde(rename = "ORC")]
    order: Option<AttributeMap>,
    #[serde(rename = "OBR")]
    request: Option<AttributeMap>,
    #[serde(rename = "OBX", default)]
    observations: Vec<AttributeMap>,
    #[serde(rename = "NTE", default)]
    notes: Vec<AttributeMap>,
}

impl TryFrom<RecordDocument> for IntermediateRecord {
    type Error = Hl7Error;

    fn try_from(doc: RecordDocument) -> Result<Self, Self::Error> {
        let header = required(doc.header, SegmentKind::Header)?;
        let patient = required(doc.patient, SegmentKind::Patient)?;
        let order = required(doc.order, SegmentKind::Order)?;
        let request = required(doc.request, SegmentKind::Request)?;
        Self::new(header, patient, order, request, doc.observations, doc.notes)
    }
}

fn required(slot: Option<AttributeMap>, kind: SegmentKind) -> Result<AttributeMap, Hl7Error> {
    slot.ok_or(Hl7Error::MissingSegment(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_new_requires_observation() {
        let err = IntermediateRecord::new(
            AttributeMap::new(),
            AttributeMap::new(),
            AttributeMap::new(),
            AttributeMap::new(),
            vec![],
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, Hl7Error::MissingSegment(SegmentKind::Observation));
    }

    #[test]
    fn test_json_keys_by_segment_tag() {
        let record = IntermediateRecord::new(
            attrs(&[("DateTimeOfMessage", "202401151030")]),
            attrs(&[("PatientID", "PAT123")]),
            attrs(&[("OrderControl", "RE")]),
            attrs(&[("UniversalServiceIdentifier", "1234-5^Glucose")]),
            vec![attrs(&[("ObservationValue", "140")])],
            vec![],
        )
        .unwrap();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["MSH"]["DateTimeOfMessage"], "202401151030");
        assert_eq!(json["PID"]["PatientID"], "PAT123");
        assert_eq!(json["OBX"][0]["ObservationValue"], "140");
        assert!(json.get("NTE").is_none());

        let back: IntermediateRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserialize_rejects_missing_observations() {
        let json = json!({
            "MSH": {}, "PID": {}, "ORC": {}, "OBR": {}, "OBX": []
        });
        let err = serde_json::from_value::<IntermediateRecord>(json).unwrap_err();
        assert!(err.to_string().contains("OBX"));
    }

    #[test]
    fn test_deserialize_rejects_missing_singleton() {
        let json = json!({ "MSH": {}, "PID": {}, "ORC": {}, "OBX": [{}] });
        assert!(serde_json::from_value::<IntermediateRecord>(json).is_err());
    }

    #[test]
    fn test_from_json_reports_first_missing_segment() {
        let err = IntermediateRecord::from_json(r#"{"MSH":{},"PID":{},"OBR":{},"OBX":[{}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), "MissingSegmentError");
        assert!(matches!(
            err,
            CourierError::Hl7(Hl7Error::MissingSegment(SegmentKind::Order))
        ));

        let err = IntermediateRecord::from_json(r#"{"OBX":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            CourierError::Hl7(Hl7Error::MissingSegment(SegmentKind::Header))
        ));

        let err =
            IntermediateRecord::from_json(r#"{"MSH":{},"PID":{},"ORC":{},"OBR":{},"OBX":[]}"#)
                .unwrap_err();
        assert!(matches!(
            err,
            CourierError::Hl7(Hl7Error::MissingSegment(SegmentKind::Observation))
        ));
    }

    #[test]
    fn test_from_json_keeps_serialization_error_for_bad_json() {
        let err = IntermediateRecord::from_json("{ not json").unwrap_err();
        assert_eq!(err.kind(), "SerializationError");

        let err = IntermediateRecord::from_json(r#"{"MSH":"text"}"#).unwrap_err();
        assert_eq!(err.kind(), "SerializationError");
    }

    #[test]
    fn test_attribute_lookup() {
        let map = attrs(&[("Units", "mmol/L")]);
        assert_eq!(
            attribute(&map, SegmentKind::Observation, "Units").unwrap(),
            "mmol/L"
        );
        assert_eq!(
            attribute(&map, SegmentKind::Observation, "ReferenceRange").unwrap_err(),
            MappingError::MissingAttribute {
                segment: SegmentKind::Observation,
                attribute: "ReferenceRange".to_string(),
            }
        );
    }
}
