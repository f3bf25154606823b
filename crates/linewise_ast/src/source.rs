//! Line-oriented view of a source text.
//!
//! [`SourceText`] decomposes a text into lines once and resolves locations in
//! both directions: `(line, column)` to byte offset and back. It is read-only;
//! applying a fix produces a new text and therefore a new `SourceText`.

use crate::error::SourceError;
use crate::span::{Location, Position, Span};

/// Pre-computed metadata for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    /// Byte offset of line start (inclusive).
    pub start: u32,
    /// Byte offset of end of line content, excluding the line terminator.
    pub end: u32,
    /// Byte length of leading whitespace.
    pub indent_bytes: u32,
    /// Whether this line contains only whitespace.
    pub is_blank: bool,
}

impl LineInfo {
    /// Creates a new LineInfo from a line's content.
    pub fn from_line(start: u32, line_text: &str) -> Self {
        let leading_len = line_text.len() - line_text.trim_start().len();

        Self {
            start,
            end: start + line_text.len() as u32,
            indent_bytes: leading_len as u32,
            is_blank: leading_len == line_text.len(),
        }
    }

    /// Returns the byte offset of the first non-whitespace character.
    pub fn content_start(&self) -> u32 {
        self.start + self.indent_bytes
    }

    /// Length of the line content in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if the line has no content at all.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A source text split into lines.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    lines: Vec<LineInfo>,
}

impl<'a> SourceText<'a> {
    /// Decomposes `text` into lines.
    ///
    /// Lines are terminated by `\r\n`, `\n`, `\r`, U+2028 or U+2029.
    pub fn new(text: &'a str) -> Result<Self, SourceError> {
        if u32::try_from(text.len()).is_err() {
            return Err(SourceError::TooLarge { len: text.len() });
        }

        let mut lines = Vec::new();
        let mut line_start = 0usize;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            let terminator_len = match ch {
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => {
                    chars.next();
                    2
                }
                '\r' | '\n' => 1,
                '\u{2028}' | '\u{2029}' => ch.len_utf8(),
                _ => continue,
            };

            lines.push(LineInfo::from_line(
                line_start as u32,
                &text[line_start..idx],
            ));
            line_start = idx + terminator_len;
        }
        lines.push(LineInfo::from_line(line_start as u32, &text[line_start..]));

        Ok(Self { text, lines })
    }

    /// The raw text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length of the text in bytes.
    pub fn len(&self) -> u32 {
        self.text.len() as u32
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines in a naive split, so `"a\n"` has two lines.
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Number of lines that rules should judge.
    ///
    /// A text ending in a line terminator has an empty final line in the
    /// naive split; that line is not a real line and is not counted here.
    pub fn checkable_line_count(&self) -> u32 {
        match self.lines.last() {
            Some(last) if last.is_empty() => self.line_count() - 1,
            _ => self.line_count(),
        }
    }

    /// Metadata of every line, in order.
    pub fn line_infos(&self) -> &[LineInfo] {
        &self.lines
    }

    /// Metadata of a 1-indexed line.
    pub fn line_info(&self, line: u32) -> Result<&LineInfo, SourceError> {
        line.checked_sub(1)
            .and_then(|idx| self.lines.get(idx as usize))
            .ok_or(SourceError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })
    }

    /// Content of a 1-indexed line, without its terminator.
    pub fn line(&self, line: u32) -> Result<&'a str, SourceError> {
        let info = self.line_info(line)?;
        Ok(&self.text[info.start as usize..info.end as usize])
    }

    /// Iterates over `(line_number, content)` pairs.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(idx, info)| {
            (
                idx as u32 + 1,
                &self.text[info.start as usize..info.end as usize],
            )
        })
    }

    /// Resolves a position to a byte offset.
    ///
    /// `(line_count + 1, 0)` is accepted as the end-of-text sentinel and maps
    /// to `len()`. Columns may address a line's terminator but never the next
    /// line.
    pub fn offset_of(&self, position: Position) -> Result<u32, SourceError> {
        let line_count = self.line_count();
        if position.line == line_count + 1 && position.column == 0 {
            return Ok(self.len());
        }

        let info = self.line_info(position.line)?;
        let max_offset = if position.line == line_count {
            self.len()
        } else {
            self.lines[position.line as usize].start - 1
        };
        let max_column = max_offset - info.start;

        if position.column > max_column {
            return Err(SourceError::ColumnOutOfRange {
                line: position.line,
                column: position.column,
                max_column,
            });
        }

        let offset = info.start + position.column;
        if !self.text.is_char_boundary(offset as usize) {
            return Err(SourceError::NotCharBoundary { offset });
        }

        Ok(offset)
    }

    /// Resolves a byte offset to a position.
    pub fn position_of(&self, offset: u32) -> Result<Position, SourceError> {
        if offset > self.len() {
            return Err(SourceError::OffsetOutOfRange {
                offset,
                len: self.len(),
            });
        }
        if !self.text.is_char_boundary(offset as usize) {
            return Err(SourceError::NotCharBoundary { offset });
        }

        let idx = self.lines.partition_point(|info| info.start <= offset) - 1;
        let info = &self.lines[idx];

        Ok(Position::new(idx as u32 + 1, offset - info.start))
    }

    /// Resolves a location to a byte span, rejecting inverted locations.
    pub fn span_of(&self, location: Location) -> Result<Span, SourceError> {
        let start = self.offset_of(location.start)?;
        let end = self.offset_of(location.end)?;

        if end < start {
            return Err(SourceError::Inverted { start, end });
        }

        Ok(Span::new(start, end))
    }

    /// Checks that a byte span lies within the text on character boundaries.
    pub fn check_span(&self, span: Span) -> Result<(), SourceError> {
        if span.end < span.start {
            return Err(SourceError::Inverted {
                start: span.start,
                end: span.end,
            });
        }
        for offset in [span.start, span.end] {
            if offset > self.len() {
                return Err(SourceError::OffsetOutOfRange {
                    offset,
                    len: self.len(),
                });
            }
            if !self.text.is_char_boundary(offset as usize) {
                return Err(SourceError::NotCharBoundary { offset });
            }
        }
        Ok(())
    }
}
