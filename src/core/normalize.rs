//! Field normalizers
//!
//! Helpers that turn raw field text into typed values: composite splitting on
//! `^`, coded `code^display` pairs, and timestamps.

use crate::domain::errors::MappingError;
use chrono::{NaiveDate, NaiveDateTime};

/// Separator between the components of a composite field
pub const COMPONENT_SEPARATOR: char = '^';

/// Splits a composite field into its components
///
/// Splitting never drops empty components, so [`join_components`] restores the
/// original text exactly.
pub fn split_components(field: &str) -> Vec<&str> {
    field.split(COMPONENT_SEPARATOR).collect()
}

/// Joins components back into a composite field
pub fn join_components(components: &[&str]) -> String {
    components.join(&COMPONENT_SEPARATOR.to_string())
}

/// First component of a composite field (the whole field when it has no `^`)
pub fn first_component(field: &str) -> &str {
    field.split(COMPONENT_SEPARATOR).next().unwrap_or_default()
}

/// Extracts `(code, display)` from a `code^display[^...]` field
///
/// # Errors
///
/// Returns [`MappingError::CompositeField`] when the field has fewer than two
/// components.
///
/// # Examples
///
/// ```
/// use courier::core::normalize::coded_pair;
///
/// let (code, display) = coded_pair("ObservationIdentifier", "5678-9^Sodium^LN").unwrap();
/// assert_eq!((code, display), ("5678-9", "Sodium"));
/// assert!(coded_pair("ObservationIdentifier", "5678-9").is_err());
/// ```
pub fn coded_pair<'a>(field: &str, value: &'a str) -> Result<(&'a str, &'a str), MappingError> {
    let components = split_components(value);
    match components.as_slice() {
        [code, display, ..] => Ok((*code, *display)),
        _ => Err(MappingError::CompositeField {
            field: field.to_string(),
            value: value.to_string(),
            expected: 2,
            found: components.len(),
        }),
    }
}

/// Recognized timestamp layouts, tried in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampPattern {
    /// `YYYYMMDDHHMM`
    DateHourMinute,
    /// `YYYYMMDDHHMMSS`
    DateHourMinuteSecond,
    /// `YYYYMMDD`, time set to midnight
    Date,
}

impl TimestampPattern {
    /// Patterns in matching order
    pub const ORDERED: [TimestampPattern; 3] = [
        TimestampPattern::DateHourMinute,
        TimestampPattern::DateHourMinuteSecond,
        TimestampPattern::Date,
    ];

    /// chrono format string of the pattern
    pub fn format(self) -> &'static str {
        match self {
            Self::DateHourMinute => "%Y%m%d%H%M",
            Self::DateHourMinuteSecond => "%Y%m%d%H%M%S",
            Self::Date => "%Y%m%d",
        }
    }

    fn parse(self, text: &str) -> Option<NaiveDateTime> {
        match self {
            Self::Date => NaiveDate::parse_from_str(text, self.format())
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0)),
            _ => NaiveDateTime::parse_from_str(text, self.format()).ok(),
        }
    }
}

/// Parsed timestamp without timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub value: NaiveDateTime,
    pub pattern: TimestampPattern,
}

impl Timestamp {
    /// `YYYY-MM-DD`
    pub fn to_date_string(&self) -> String {
        self.value.format("%Y-%m-%d").to_string()
    }

    /// `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_instant_string(&self) -> String {
        self.value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

/// Parses an HL7 timestamp using the first pattern that matches
///
/// # Errors
///
/// Returns [`MappingError::DateFormat`] when no pattern matches.
///
/// # Examples
///
/// ```
/// use courier::core::normalize::parse_timestamp;
///
/// let ts = parse_timestamp("202401151030").unwrap();
/// assert_eq!(ts.to_instant_string(), "2024-01-15T10:30:00Z");
/// assert_eq!(ts.to_date_string(), "2024-01-15");
/// ```
pub fn parse_timestamp(text: &str) -> Result<Timestamp, MappingError> {
    // chrono accepts signs and short numbers; the source layouts are digits only
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!(value = text, "Timestamp is not all digits");
        return Err(MappingError::DateFormat(text.to_string()));
    }

    for pattern in TimestampPattern::ORDERED {
        match pattern.parse(text) {
            Some(value) => return Ok(Timestamp { value, pattern }),
            None => tracing::debug!(
                value = text,
                pattern = pattern.format(),
                "Timestamp does not match pattern"
            ),
        }
    }

    Err(MappingError::DateFormat(text.to_string()))
}
