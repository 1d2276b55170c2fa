//! HL7 v2 message parsing
//!
//! Turns pipe-delimited message text into an [`IntermediateRecord`]:
//!
//! - [`tokenizer`] splits lines and fields
//! - [`segments`] holds the per-segment field tables
//! - [`assembler`] collects parsed segments into the record

pub mod assembler;
pub mod segments;
pub mod tokenizer;

pub use assembler::MessageAssembler;
pub use tokenizer::{tokenize, RawSegment, Segments};

use crate::config::DuplicateSegmentPolicy;
use crate::domain::errors::Hl7Error;
use crate::domain::record::IntermediateRecord;

/// Parses a whole message into an intermediate record
///
/// # Errors
///
/// Returns the first structural error encountered, or a missing segment error
/// once all segments have been read.
///
/// # Examples
///
/// ```
/// use courier::config::DuplicateSegmentPolicy;
/// use courier::core::parse::parse_message;
///
/// let message = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|202401151030||ORU^R01|MSG001|P|2.5\r\n\
///                PID|1||PAT123^^^HOSP||Doe^John||19800101|M\r\n\
///                ORC|RE|ORD1|FIL1||CM\r\n\
///                OBR|1|ORD1|FIL1|1234-5^Glucose|||202401151000\r\n\
///                OBX|1|NM|5678-9^Sodium||140|mmol/L|135-145|N|||F";
///
/// let record = parse_message(message, DuplicateSegmentPolicy::default()).unwrap();
/// assert_eq!(record.observations().len(), 1);
/// ```
pub fn parse_message(
    text: &str,
    policy: DuplicateSegmentPolicy,
) -> Result<IntermediateRecord, Hl7Error> {
    let mut assembler = MessageAssembler::new(policy);
    for segment in tokenize(text) {
        assembler.push(&segment)?;
    }

    if assembler.ignored() > 0 {
        tracing::debug!(ignored = assembler.ignored(), "Skipped unmodeled segments");
    }

    assembler.finish()
}
