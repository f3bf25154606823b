//! Line ranges excluded from blank-line judgments.

use crate::error::SourceError;
use crate::literal::template_literal_spans;
use crate::source::SourceText;
use crate::span::Span;

/// A half-open range of 1-indexed lines, `[start_line, end_line)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExcludedRegion {
    /// First excluded line.
    pub start_line: u32,
    /// First line after the region.
    pub end_line: u32,
}

impl ExcludedRegion {
    /// Creates a new region.
    pub const fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }

    /// Returns true if the region covers `line`.
    pub const fn contains(&self, line: u32) -> bool {
        self.start_line <= line && line < self.end_line
    }

    /// Returns true if the region covers no line.
    pub const fn is_empty(&self) -> bool {
        self.end_line <= self.start_line
    }
}

/// The sorted, merged set of excluded regions of one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedRegions {
    regions: Vec<ExcludedRegion>,
}

impl ExcludedRegions {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary regions, dropping empty ones and merging
    /// overlapping or touching ones.
    pub fn from_regions(regions: impl IntoIterator<Item = ExcludedRegion>) -> Self {
        let mut sorted: Vec<ExcludedRegion> =
            regions.into_iter().filter(|r| !r.is_empty()).collect();
        sorted.sort();

        let mut merged: Vec<ExcludedRegion> = Vec::with_capacity(sorted.len());
        for region in sorted {
            match merged.last_mut() {
                Some(last) if region.start_line <= last.end_line => {
                    last.end_line = last.end_line.max(region.end_line);
                }
                _ => merged.push(region),
            }
        }

        Self { regions: merged }
    }

    /// Converts byte spans into the line ranges they open:
    /// `[line of span start, line of span end)`.
    pub fn from_spans(
        source: &SourceText<'_>,
        spans: impl IntoIterator<Item = Span>,
    ) -> Result<Self, SourceError> {
        let mut regions = Vec::new();
        for span in spans {
            let start = source.position_of(span.start)?;
            let end = source.position_of(span.end)?;
            regions.push(ExcludedRegion::new(start.line, end.line));
        }
        Ok(Self::from_regions(regions))
    }

    /// Lines inside the raw text of template literals.
    pub fn template_literals(source: &SourceText<'_>) -> Result<Self, SourceError> {
        Self::from_spans(source, template_literal_spans(source.text()))
    }

    /// Returns true if `line` is excluded.
    pub fn contains(&self, line: u32) -> bool {
        let idx = self.regions.partition_point(|r| r.end_line <= line);
        self.regions.get(idx).is_some_and(|r| r.contains(line))
    }

    /// The merged regions, sorted by start line.
    pub fn iter(&self) -> impl Iterator<Item = &ExcludedRegion> {
        self.regions.iter()
    }

    /// Number of merged regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if nothing is excluded.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
