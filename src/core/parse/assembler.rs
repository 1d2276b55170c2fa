//! Message assembler
//!
//! Routes parsed segments into the slots of an [`IntermediateRecord`].

use super::segments::{parse_segment, spec_for};
use super::tokenizer::RawSegment;
use crate::config::DuplicateSegmentPolicy;
use crate::domain::errors::Hl7Error;
use crate::domain::record::{AttributeMap, IntermediateRecord};
use crate::domain::segment::SegmentKind;

/// Accumulates segments of one message
///
/// Segment order is not enforced; only presence is checked in [`finish`](Self::finish).
#[derive(Debug)]
pub struct MessageAssembler {
    policy: DuplicateSegmentPolicy,
    header: Option<AttributeMap>,
    patient: Option<AttributeMap>,
    order: Option<AttributeMap>,
    request: Option<AttributeMap>,
    observations: Vec<AttributeMap>,
    notes: Vec<AttributeMap>,
    ignored: usize,
}

impl MessageAssembler {
    /// Creates an empty assembler
    pub fn new(policy: DuplicateSegmentPolicy) -> Self {
        Self {
            policy,
            header: None,
            patient: None,
            order: None,
            request: None,
            observations: Vec::new(),
            notes: Vec::new(),
            ignored: 0,
        }
    }

    /// Parses `segment` and stores its attributes
    ///
    /// Segments with an unmodeled tag are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::Structure`] when the segment is too short, and
    /// [`Hl7Error::DuplicateSegment`] when a singleton repeats under
    /// [`DuplicateSegmentPolicy::Reject`].
    pub fn push(&mut self, segment: &RawSegment<'_>) -> Result<(), Hl7Error> {
        let Some(kind) = SegmentKind::from_tag(segment.tag()) else {
            tracing::debug!(tag = segment.tag(), "Ignoring unmodeled segment");
            self.ignored += 1;
            return Ok(());
        };

        let attributes = parse_segment(spec_for(kind), segment)?;
        let policy = self.policy;

        match kind {
            SegmentKind::Header => store(&mut self.header, kind, attributes, policy),
            SegmentKind::Patient => store(&mut self.patient, kind, attributes, policy),
            SegmentKind::Order => store(&mut self.order, kind, attributes, policy),
            SegmentKind::Request => store(&mut self.request, kind, attributes, policy),
            SegmentKind::Observation => {
                self.observations.push(attributes);
                Ok(())
            }
            SegmentKind::Note => {
                self.notes.push(attributes);
                Ok(())
            }
        }
    }

    /// Number of segments skipped because their tag is not modeled
    pub fn ignored(&self) -> usize {
        self.ignored
    }

    /// Completes the record
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::MissingSegment`] naming the first absent required
    /// segment in the order MSH, PID, ORC, OBR, OBX.
    pub fn finish(self) -> Result<IntermediateRecord, Hl7Error> {
        let header = self
            .header
            .ok_or(Hl7Error::MissingSegment(SegmentKind::Header))?;
        let patient = self
            .patient
            .ok_or(Hl7Error::MissingSegment(SegmentKind::Patient))?;
        let order = self
            .order
            .ok_or(Hl7Error::MissingSegment(SegmentKind::Order))?;
        let request = self
            .request
            .ok_or(Hl7Error::MissingSegment(SegmentKind::Request))?;

        IntermediateRecord::new(
            header,
            patient,
            order,
            request,
            self.observations,
            self.notes,
        )
    }
}

fn store(
    slot: &mut Option<AttributeMap>,
    kind: SegmentKind,
    attributes: AttributeMap,
    policy: DuplicateSegmentPolicy,
) -> Result<(), Hl7Error> {
    if slot.is_some() {
        match policy {
            DuplicateSegmentPolicy::Reject => return Err(Hl7Error::DuplicateSegment(kind)),
            DuplicateSegmentPolicy::LastWriteWins => {
                tracing::warn!(segment = kind.tag(), "Duplicate segment replaces earlier occurrence");
            }
        }
    }
    *slot = Some(attributes);
    Ok(())
}
