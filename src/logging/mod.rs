//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Console output filtered by level
//! - Optional JSON log files with rotation
//! - Macros with consistent field names for conversion events
//!
//! # Example
//!
//! ```no_run
//! use courier::logging::init_logging;
//! use courier::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a conversion
///
/// # Example
///
/// ```no_run
/// use courier::log_conversion_start;
///
/// log_conversion_start!("convert", "message.hl7");
/// ```
#[macro_export]
macro_rules! log_conversion_start {
    ($stage:expr, $source:expr) => {
        tracing::info!(
            stage = $stage,
            source = %$source,
            "Starting conversion"
        );
    };
}

/// Log the completion of a conversion
///
/// # Example
///
/// ```no_run
/// use courier::log_conversion_complete;
/// use std::time::Duration;
///
/// log_conversion_complete!("convert", 3, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_conversion_complete {
    ($stage:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            stage = $stage,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Conversion completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use courier::log_error_with_context;
/// use courier::domain::CourierError;
///
/// let error = CourierError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = $error.kind(),
            context = $context,
            "Error occurred"
        );
    };
}

#[cfg(test)]
mod tests {
    use crate::domain::{CourierError, Hl7Error, SegmentKind};
    use std::time::Duration;

    #[test]
    fn test_macros_expand() {
        // No subscriber is installed; this only exercises the expansions.
        let error = CourierError::from(Hl7Error::MissingSegment(SegmentKind::Observation));
        crate::log_conversion_start!("parse", "inline");
        crate::log_conversion_complete!("parse", 1usize, Duration::from_millis(2));
        crate::log_error_with_context!(&error, "Conversion failed");
    }
}
