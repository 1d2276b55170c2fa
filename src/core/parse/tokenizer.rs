//! Segment tokenizer
//!
//! Splits message text into segments (one per line) and each segment into
//! fields on `|`. Tokenizing borrows from the input; nothing is copied until a
//! segment parser extracts attributes.

use std::iter::FusedIterator;

/// Separator between the fields of a segment
pub const FIELD_SEPARATOR: char = '|';

/// One line of a message split into fields
///
/// `fields[0]` is the segment tag. For MSH, `fields[1]` holds the encoding
/// characters because the field separator itself is consumed by the split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment<'a> {
    fields: Vec<&'a str>,
}

impl<'a> RawSegment<'a> {
    /// Splits a single line into fields
    pub fn parse(line: &'a str) -> Self {
        Self {
            fields: line.split(FIELD_SEPARATOR).collect(),
        }
    }

    /// Segment tag (field 0)
    pub fn tag(&self) -> &'a str {
        self.fields.first().copied().unwrap_or_default()
    }

    /// Field at `index`, `None` when out of range
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Field at `index`, empty when out of range
    pub fn field_or_empty(&self, index: usize) -> &'a str {
        self.field(index).unwrap_or_default()
    }

    /// Number of fields including the tag
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Always false; a segment has at least its tag field
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All fields including the tag
    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }
}

/// Lazy sequence of segments over a message
///
/// A clone is an independent cursor over the remaining lines. Calling
/// [`tokenize`] again starts over from the first line.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    lines: std::str::Split<'a, char>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = RawSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() {
                continue;
            }
            return Some(RawSegment::parse(line));
        }
    }
}

impl FusedIterator for Segments<'_> {}

/// Tokenizes a message into segments
///
/// The whole message is trimmed first, lines end in `\n` or `\r\n`, and empty
/// lines are dropped. Segment order is source order.
///
/// # Examples
///
/// ```
/// use courier::core::parse::tokenize;
///
/// let segments: Vec<_> = tokenize("MSH|^~\\&|LAB\r\nPID|1||PAT123\n\n").collect();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1].tag(), "PID");
/// assert_eq!(segments[1].field(3), Some("PAT123"));
/// ```
pub fn tokenize(message: &str) -> Segments<'_> {
    Segments {
        lines: message.trim().split('\n'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_segment_field_access() {
        let segment = RawSegment::parse("OBX|1|NM|5678-9^Sodium||140|mmol/L");
        assert_eq!(segment.tag(), "OBX");
        assert_eq!(segment.len(), 7);
        assert_eq!(segment.field(3), Some("5678-9^Sodium"));
        assert_eq!(segment.field(4), Some(""));
        assert_eq!(segment.field(7), None);
        assert_eq!(segment.field_or_empty(12), "");
        assert!(!segment.is_empty());
    }

    #[test]
    fn test_tokenize_mixed_line_endings() {
        let text = "MSH|a\r\nPID|b\nORC|c\r\n";
        let tags: Vec<&str> = tokenize(text).map(|s| s.tag()).collect();
        assert_eq!(tags, vec!["MSH", "PID", "ORC"]);
    }

    #[test]
    fn test_tokenize_drops_trailing_and_blank_lines() {
        let text = "\n  MSH|a\n\nPID|b\r\n\r\n\n";
        let segments: Vec<_> = tokenize(text).collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].fields(), &["MSH", "a"]);
    }

    #[test]
    fn test_tokenize_empty_message() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize(" \r\n \n").count(), 0);
    }

    #[test]
    fn test_tokenize_is_restartable() {
        let text = "MSH|a|b\r\nOBX|1\nOBX|2";
        let segments = tokenize(text);
        let first: Vec<_> = segments.clone().collect();
        let second: Vec<_> = segments.collect();
        assert_eq!(first, second);
        assert_eq!(first, tokenize(text).collect::<Vec<_>>());
    }

    #[test]
    fn test_tokenize_keeps_field_whitespace() {
        let segments: Vec<_> = tokenize("NTE|1|L| free text ").collect();
        assert_eq!(segments[0].field(3), Some(" free text"));
    }
}
