//! Source model error types.

use thiserror::Error;

/// Errors raised when a location cannot be resolved against a source text.
///
/// These indicate a defect in the caller (usually a rule computing a bad
/// location), so they are reported rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Line number outside `1..=line_count` (or the end-of-text sentinel).
    #[error("line {line} is out of range (source has {line_count} lines)")]
    LineOutOfRange { line: u32, line_count: u32 },

    /// Column past the end of its line.
    #[error("column {column} is out of range for line {line} (maximum {max_column})")]
    ColumnOutOfRange {
        line: u32,
        column: u32,
        max_column: u32,
    },

    /// Byte offset past the end of the text.
    #[error("offset {offset} is out of range (source length {len})")]
    OffsetOutOfRange { offset: u32, len: u32 },

    /// Byte offset inside a multi-byte character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },

    /// Location whose end precedes its start.
    #[error("location ends at offset {end} before it starts at offset {start}")]
    Inverted { start: u32, end: u32 },

    /// Text too large to address with 32-bit offsets.
    #[error("source text of {len} bytes exceeds the supported maximum")]
    TooLarge { len: usize },
}
