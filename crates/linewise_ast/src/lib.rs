//! # linewise_ast
//!
//! Source text model for Linewise.
//!
//! Linewise judges source text as lines, not as a syntax tree. This crate
//! provides:
//! - [`Position`], [`Location`] and [`Span`] for addressing text
//! - [`SourceText`], the line decomposition with offset/position mapping
//! - [`ExcludedRegions`], line ranges (such as template literal bodies) that
//!   must not be judged as blank
//!
//! ## Example
//!
//! ```rust
//! use linewise_ast::{Position, SourceText};
//!
//! let source = SourceText::new("let a = 1;\n\tlet b = 2;\n").unwrap();
//!
//! assert_eq!(source.checkable_line_count(), 2);
//! assert_eq!(source.offset_of(Position::new(2, 1)).unwrap(), 12);
//! ```

mod error;
mod literal;
mod region;
mod source;
mod span;

pub use error::SourceError;
pub use literal::template_literal_spans;
pub use region::{ExcludedRegion, ExcludedRegions};
pub use source::{LineInfo, SourceText};
pub use span::{Location, Position, Span};
