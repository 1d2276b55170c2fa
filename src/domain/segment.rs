//! Segment type tags
//!
//! The six HL7 v2 segment types Courier understands. Any other tag found in a
//! message is ignored by the assembler.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known segment types of an ORU-style lab result message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentKind {
    /// MSH - message header
    Header,
    /// PID - subject (patient) identification
    Patient,
    /// ORC - common order
    Order,
    /// OBR - observation request
    Request,
    /// OBX - observation result (repeating)
    Observation,
    /// NTE - notes and comments (repeating)
    Note,
}

impl SegmentKind {
    /// Required segment types, in the order presence is checked
    pub const REQUIRED: [SegmentKind; 5] = [
        SegmentKind::Header,
        SegmentKind::Patient,
        SegmentKind::Order,
        SegmentKind::Request,
        SegmentKind::Observation,
    ];

    /// Three-letter tag found in field 0 of the segment
    pub fn tag(self) -> &'static str {
        match self {
            Self::Header => "MSH",
            Self::Patient => "PID",
            Self::Order => "ORC",
            Self::Request => "OBR",
            Self::Observation => "OBX",
            Self::Note => "NTE",
        }
    }

    /// Descriptive name used in error messages and logs
    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Patient => "subject-identification",
            Self::Order => "order-request",
            Self::Request => "result-request",
            Self::Observation => "result-observation",
            Self::Note => "note",
        }
    }

    /// Looks up a segment type by its tag, `None` for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "MSH" => Some(Self::Header),
            "PID" => Some(Self::Patient),
            "ORC" => Some(Self::Order),
            "OBR" => Some(Self::Request),
            "OBX" => Some(Self::Observation),
            "NTE" => Some(Self::Note),
            _ => None,
        }
    }

    /// Whether the segment may occur more than once per message
    pub fn is_repeating(self) -> bool {
        matches!(self, Self::Observation | Self::Note)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag(), self.name())
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("Unknown segment tag: {s}"))
    }
}
