// Courier - HL7 v2 to FHIR Converter
// Copyright (c) 2025 Courier Contributors
// Licensed under the MIT License

//! # Courier - HL7 v2 to FHIR Converter
//!
//! Courier converts pipe-delimited HL7 v2 laboratory result messages into
//! FHIR-style transaction bundles.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Parsing** messages into a normalized intermediate record keyed by segment type
//! - **Mapping** the record to a DiagnosticReport and one Observation per OBX
//! - **Bundling** the resources into a transaction with one POST entry each
//! - **Reporting** failures as structured, typed errors
//!
//! ## Architecture
//!
//! Courier follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Parsing, normalization, mapping and conversion orchestration
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier::config::load_config_or_default;
//! use courier::core::convert::Converter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("courier.toml")?;
//!     let converter = Converter::new(config);
//!
//!     let message = std::fs::read_to_string("message.hl7")?;
//!     let conversion = converter.convert_message(&message)?;
//!
//!     println!("{}", converter.render(&conversion.output)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Two-Step Conversion
//!
//! The intermediate record can be stored and bundled later:
//!
//! ```rust,no_run
//! use courier::config::CourierConfig;
//! use courier::core::convert::Converter;
//! use courier::domain::IntermediateRecord;
//!
//! # fn example(message: &str) -> Result<(), Box<dyn std::error::Error>> {
//! let converter = Converter::new(CourierConfig::default());
//!
//! let record = converter.parse(message)?.output;
//! let json = serde_json::to_string(&record)?;
//!
//! let restored: IntermediateRecord = serde_json::from_str(&json)?;
//! let bundle = converter.bundle_record(&restored)?.output;
//! println!("{} entries", bundle.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Courier uses [`domain::CourierError`] for all errors. Every error has a stable
//! kind and converts into the structured [`domain::ErrorReport`]:
//!
//! ```rust
//! use courier::config::CourierConfig;
//! use courier::core::convert::Converter;
//! use courier::domain::ErrorReport;
//!
//! let converter = Converter::new(CourierConfig::default());
//! let err = converter.convert_message("MSH|^~\\&").unwrap_err();
//!
//! let report = ErrorReport::from(&err);
//! assert_eq!(report.error.kind, "StructureError");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
