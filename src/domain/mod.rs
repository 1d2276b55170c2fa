//! Domain models and types for Courier.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Segment tags** ([`SegmentKind`]) for the six modeled HL7 v2 segments
//! - **The intermediate record** ([`IntermediateRecord`]) handed from parsing to mapping
//! - **Resources** ([`DiagnosticReport`], [`Observation`]) and the [`Bundle`] wrapping them
//! - **Strongly-typed identifiers** ([`ResourceId`], [`PatientId`])
//! - **Error types** ([`CourierError`], [`Hl7Error`], [`MappingError`]) and [`ErrorReport`]
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible pipeline operations return [`Result<T, CourierError>`]; stage
//! errors convert with `?`:
//!
//! ```rust
//! use courier::domain::{Hl7Error, Result, SegmentKind};
//!
//! fn example() -> Result<()> {
//!     let stage: std::result::Result<(), Hl7Error> = Ok(());
//!     stage?;
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod errors;
pub mod ids;
pub mod record;
pub mod resource;
pub mod result;
pub mod segment;

// Re-export commonly used types for convenience
pub use bundle::{Bundle, BundleEntry, BundleRequest, BundleType, HttpVerb};
pub use errors::{CourierError, ErrorReport, Hl7Error, MappingError};
pub use ids::{PatientId, ResourceId};
pub use record::{AttributeMap, IntermediateRecord};
pub use resource::{
    CodeableConcept, Coding, DiagnosticReport, Observation, Quantity, Reference, Resource,
    ResourceStatus, ResourceType,
};
pub use result::Result;
pub use segment::SegmentKind;
