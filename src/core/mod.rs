//! Core conversion logic for Courier.
//!
//! # Modules
//!
//! - [`parse`] - Tokenizing and assembling HL7 v2 messages into intermediate records
//! - [`normalize`] - Composite, coded and timestamp field helpers
//! - [`transform`] - Mapping records to resources and building transaction bundles
//! - [`convert`] - Orchestration of the stages and run summaries
//!
//! # Conversion Workflow
//!
//! 1. **Tokenize**: Split the message into segments and fields
//! 2. **Assemble**: Extract attributes per segment type into an intermediate record
//! 3. **Map**: Build the report and one observation per OBX
//! 4. **Bundle**: Wrap the resources in a transaction bundle
//! 5. **Report**: Produce a conversion summary
//!
//! # Example
//!
//! ```rust
//! use courier::config::CourierConfig;
//! use courier::core::convert::Converter;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let message = "MSH|^~\\&|LAB|HOSP|EHR|HOSP|202401151030||ORU^R01|MSG001|P|2.5\n\
//!                PID|1||PAT123^^^HOSP||Doe^John||19800101|M\n\
//!                ORC|RE|ORD1|FIL1||CM\n\
//!                OBR|1|ORD1|FIL1|1234-5^Glucose|||20240115\n\
//!                OBX|1|NM|5678-9^Sodium||140|mmol/L|135-145|N|||F";
//!
//! let converter = Converter::new(CourierConfig::default());
//! let conversion = converter.convert_message(message)?;
//!
//! println!("Entries: {}", conversion.summary.bundle_entries);
//! println!("{}", converter.render(&conversion.output)?);
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod normalize;
pub mod parse;
pub mod transform;
