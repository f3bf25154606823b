//! no-multiple-empty-lines rule: Limit runs of consecutive blank lines.
//!
//! Runs at the beginning of the file, in the interior and at the end of the
//! file are judged against separate thresholds. Lines inside the raw text of a
//! multi-line template literal are never blank for this rule, since those
//! lines are part of the literal's value. The final line terminator of a file
//! does not open a blank line of its own.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | max | integer | (required) | Maximum consecutive blank lines |
//! | maxBOF | integer | `max` | Maximum blank lines at the beginning of the file |
//! | maxEOF | integer | `max` | Maximum blank lines at the end of the file |
//!
//! # Example
//!
//! ```json
//! {
//!   "rules": {
//!     "no-multiple-empty-lines": { "max": 2, "maxBOF": 0, "maxEOF": 1 }
//!   }
//! }
//! ```

use linewise_ast::{Location, Position, Span};
use linewise_rule::{
    Fix, Report, Rule, RuleContext, RuleDefinition, RuleError, RuleMeta, parse_options,
};
use serde::Deserialize;
use tracing::trace;

pub const RULE_ID: &str = "no-multiple-empty-lines";

const CONSECUTIVE_BLANK: &str = "consecutiveBlank";
const BLANK_BEGINNING_OF_FILE: &str = "blankBeginningOfFile";
const BLANK_END_OF_FILE: &str = "blankEndOfFile";

/// Configuration for the no-multiple-empty-lines rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoMultipleEmptyLinesOptions {
    /// Maximum consecutive blank lines in the interior.
    pub max: u32,
    /// Maximum blank lines at the end of the file.
    #[serde(default, rename = "maxEOF")]
    pub max_eof: Option<u32>,
    /// Maximum blank lines at the beginning of the file.
    #[serde(default, rename = "maxBOF")]
    pub max_bof: Option<u32>,
}

/// Where a run of blank lines sits in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunPosition {
    BeginningOfFile,
    Interior,
    EndOfFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Thresholds {
    interior: u32,
    bof: u32,
    eof: u32,
}

impl Thresholds {
    fn from_options(options: &NoMultipleEmptyLinesOptions) -> Self {
        Self {
            interior: options.max,
            bof: options.max_bof.unwrap_or(options.max),
            eof: options.max_eof.unwrap_or(options.max),
        }
    }

    fn for_position(&self, position: RunPosition) -> u32 {
        match position {
            RunPosition::BeginningOfFile => self.bof,
            RunPosition::Interior => self.interior,
            RunPosition::EndOfFile => self.eof,
        }
    }
}

/// Blank lines strictly between two non-blank markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlankRun {
    position: RunPosition,
    /// Last non-blank line before the run, or 0 at the beginning of the file.
    previous: u32,
    /// First non-blank line after the run, or the end-of-file sentinel.
    next: u32,
}

impl BlankRun {
    fn len(&self) -> u32 {
        self.next - self.previous - 1
    }
}

/// Turns the ascending sequence of non-blank markers into blank runs.
///
/// The marker sequence must end with the sentinel `total_lines + 1`.
#[derive(Debug)]
struct RunTracker {
    previous: u32,
    sentinel: u32,
}

impl RunTracker {
    fn new(total_lines: u32) -> Self {
        Self {
            previous: 0,
            sentinel: total_lines + 1,
        }
    }

    fn advance(&mut self, marker: u32) -> BlankRun {
        // A run that is the whole file counts as beginning-of-file.
        let position = if self.previous == 0 {
            RunPosition::BeginningOfFile
        } else if marker == self.sentinel {
            RunPosition::EndOfFile
        } else {
            RunPosition::Interior
        };

        let run = BlankRun {
            position,
            previous: self.previous,
            next: marker,
        };
        self.previous = marker;
        run
    }
}

/// Configured no-multiple-empty-lines rule.
#[derive(Debug, Clone)]
pub struct NoMultipleEmptyLines {
    thresholds: Thresholds,
}

impl NoMultipleEmptyLines {
    pub fn new(options: NoMultipleEmptyLinesOptions) -> Self {
        Self {
            thresholds: Thresholds::from_options(&options),
        }
    }

    fn report_excess(
        &self,
        ctx: &mut RuleContext<'_>,
        run: BlankRun,
        max: u32,
        total_lines: u32,
    ) -> Result<(), RuleError> {
        let source = ctx.source();

        // The `max` blank lines right before `run.next` are kept.
        let removal_start = source.offset_of(Position::line_start(run.previous + 1))?;
        let kept_from = run.next - max;
        let removal_end = if kept_from <= total_lines {
            source.offset_of(Position::line_start(kept_from))?
        } else {
            source.len()
        };

        trace!(
            previous = run.previous,
            next = run.next,
            max,
            "blank line run exceeds threshold"
        );

        let loc = Location::new(
            Position::line_start(run.previous + max + 1),
            Position::line_start(run.next),
        );
        let fix = Fix::delete(Span::new(removal_start, removal_end));

        let report = match run.position {
            RunPosition::BeginningOfFile => Report::new(BLANK_BEGINNING_OF_FILE, loc),
            RunPosition::EndOfFile => Report::new(BLANK_END_OF_FILE, loc),
            RunPosition::Interior => Report::new(CONSECUTIVE_BLANK, loc)
                .arg("pluralizedLines", if max == 1 { "line" } else { "lines" }),
        };

        ctx.report(report.arg("max", max).with_fix(fix))
    }
}

/// Returns the rule definition.
pub fn definition() -> RuleDefinition {
    let meta = RuleMeta::new(RULE_ID)
        .with_description("Disallow multiple empty lines")
        .with_fixable(true)
        .with_schema(serde_json::json!({
            "type": "object",
            "properties": {
                "max": { "type": "integer", "minimum": 0 },
                "maxEOF": { "type": "integer", "minimum": 0 },
                "maxBOF": { "type": "integer", "minimum": 0 }
            },
            "required": ["max"],
            "additionalProperties": false
        }))
        .with_message(
            CONSECUTIVE_BLANK,
            "More than {{max}} blank {{pluralizedLines}} not allowed.",
            &["max", "pluralizedLines"],
        )
        .with_message(
            BLANK_BEGINNING_OF_FILE,
            "Too many blank lines at the beginning of file. Max of {{max}} allowed.",
            &["max"],
        )
        .with_message(
            BLANK_END_OF_FILE,
            "Too many blank lines at the end of file. Max of {{max}} allowed.",
            &["max"],
        );

    RuleDefinition::new(meta, build)
}

fn build(options: serde_json::Value) -> Result<Box<dyn Rule>, RuleError> {
    Ok(Box::new(NoMultipleEmptyLines::new(parse_options(options)?)))
}

impl Rule for NoMultipleEmptyLines {
    fn check(&self, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let source = ctx.source();
        let excluded = ctx.excluded_regions();
        let total_lines = source.checkable_line_count();

        let markers: Vec<u32> = source.line_infos()[..total_lines as usize]
            .iter()
            .zip(1u32..)
            .filter(|(info, line)| !info.is_blank || excluded.contains(*line))
            .map(|(_, line)| line)
            .chain(std::iter::once(total_lines + 1))
            .collect();

        let mut tracker = RunTracker::new(total_lines);
        for marker in markers {
            let run = tracker.advance(marker);
            let max = self.thresholds.for_position(run.position);

            if run.len() > max {
                self.report_excess(ctx, run, max, total_lines)?;
            }
        }

        Ok(())
    }
}
